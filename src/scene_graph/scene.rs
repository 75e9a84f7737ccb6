use anyhow::Context;
use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;

use crate::model::Model;
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::scene_model::{SceneModel, SceneModelId};

pub struct Scene {
    objects: Arena<Object3D>,
    models: Arena<SceneModel>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            models: Arena::new(),
        }
    }

    /// Creates a named node, either at the scene root or under `parent`.
    pub fn create_child(&mut self, parent: Option<ObjectId>, name: impl Into<String>) -> ObjectId {
        let object_id = self.objects.alloc(Object3D::named(name));

        if parent.is_some() {
            self.set_object_parent(object_id, parent);
        }

        object_id
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> anyhow::Result<&mut Object3D> {
        self.objects
            .get_mut(id)
            .with_context(|| format!("Scene node {} does not exist", id.index()))
    }

    /// Direct child of `parent` with the given name.
    pub fn get_child_by_name(&self, parent: ObjectId, name: &str) -> Option<ObjectId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.objects.get(id).is_some_and(|object| object.name == name))
    }

    pub fn children(&self, parent: ObjectId) -> &[ObjectId] {
        self.objects
            .get(parent)
            .map(|object| object.child_ids.as_slice())
            .unwrap_or_default()
    }

    pub fn root_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, object)| object.parent_id.is_none())
            .map(|(id, _)| id)
    }

    pub fn add_model(&mut self, model: Model) -> SceneModelId {
        self.models.alloc(SceneModel::new(model))
    }

    #[allow(dead_code)]
    pub fn get_model(&self, id: SceneModelId) -> Option<&SceneModel> {
        self.models.get(id)
    }

    /// Swaps the model stored under `id`, or allocates a new slot when `id` is `None`.
    pub fn upsert_model(&mut self, id: Option<SceneModelId>, model: Model) -> SceneModelId {
        if let Some(id) = id {
            if let Some(slot) = self.models.get_mut(id) {
                slot.replace(model);
                return id;
            }
        }

        self.add_model(model)
    }

    #[allow(dead_code)]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Refreshes world matrices of every node whose placement changed.
    pub fn update_transforms(&self) {
        for root_id in self.root_objects() {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY, false);
        }
    }

    fn update_object_transform_recursive(
        &self,
        object_id: ObjectId,
        parent_world_matrix: Mat4,
        parent_changed: bool,
    ) {
        let Some(object) = self.objects.get(object_id) else {
            return;
        };

        let changed = parent_changed || object.transform.is_world_dirty();
        if changed {
            let world_matrix = parent_world_matrix * *object.transform.local_matrix();
            object.transform.set_world_matrix(world_matrix);
        }

        let world_matrix = *object.transform.world_matrix();
        for &child_id in &object.child_ids {
            self.update_object_transform_recursive(child_id, world_matrix, changed);
        }
    }

    fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(old_parent_id) = self.objects.get(child_id).and_then(|c| c.parent_id) {
            if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                old_parent.child_ids.retain(|&id| id != child_id);
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;
        }

        if let Some(new_parent) = new_parent_id.and_then(|id| self.objects.get_mut(id)) {
            new_parent.child_ids.push(child_id);
        }

        self.invalidate_object_hierarchy(child_id);
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_translation(translation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Quat) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_rotation(rotation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_scale(&mut self, object_id: ObjectId, scale: f32) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_scale(scale);
        }
        self.invalidate_object_hierarchy(object_id);
    }

}
