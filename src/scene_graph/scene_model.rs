use id_arena::Id;

use crate::model::Model;

pub type SceneModelId = Id<SceneModel>;

/// Arena slot for a model. Replacing the model keeps the id stable so
/// everything referencing it (visuals, collision meshes) sees the new data.
pub struct SceneModel {
    pub model: Model,
    revision: u32,
}

impl SceneModel {
    pub fn new(model: Model) -> Self {
        Self { model, revision: 0 }
    }

    pub fn replace(&mut self, model: Model) {
        self.model = model;
        self.revision += 1;
    }

    /// Number of times the model has been replaced since creation.
    #[allow(dead_code)]
    pub fn revision(&self) -> u32 {
        self.revision
    }
}
