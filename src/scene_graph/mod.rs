pub mod components;
pub mod object3d;
pub mod scene;
pub mod scene_model;
pub mod transform;

// Re-export main types for convenience
pub use components::{CollisionShape, Primitive, RigidBody, Shape};
pub use object3d::ObjectId;
pub use scene::Scene;
