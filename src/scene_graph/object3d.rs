use id_arena::Id;

use crate::scene_graph::components::{CollisionShape, RigidBody, Shape, StaticModel};
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Default)]
pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,

    pub shape: Option<Shape>,
    pub static_model: Option<StaticModel>,
    pub rigid_body: Option<RigidBody>,
    pub collision_shape: Option<CollisionShape>,
}

impl Object3D {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the node's static model, attaching an empty one first if needed.
    pub fn ensure_static_model(&mut self) -> &mut StaticModel {
        self.static_model.get_or_insert_with(StaticModel::default)
    }

    pub fn ensure_rigid_body(&mut self) -> &mut RigidBody {
        self.rigid_body.get_or_insert_with(RigidBody::default)
    }

    /// Physics components present and enabled.
    #[allow(dead_code)]
    pub fn is_physical(&self) -> bool {
        self.rigid_body.as_ref().is_some_and(|body| body.enabled)
            && self
                .collision_shape
                .as_ref()
                .is_some_and(|shape| shape.enabled)
    }
}
