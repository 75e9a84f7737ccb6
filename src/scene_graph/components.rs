//! Components a scene node can carry. They are plain data; simulating or
//! drawing them is the host's business.

use glam::{Quat, Vec3};

use crate::material::{Color, MaterialId};
use crate::scene_graph::scene_model::SceneModelId;

/// Built-in unit-sized visual primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Sphere,
    Plane,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub primitive: Primitive,
    pub color: Color,
    pub enabled: bool,
}

impl Shape {
    pub fn new(primitive: Primitive, color: Color) -> Self {
        Self {
            primitive,
            color,
            enabled: true,
        }
    }
}

/// Visual mesh built from model data.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticModel {
    pub model: Option<SceneModelId>,
    pub material: Option<MaterialId>,
    pub enabled: bool,
}

impl Default for StaticModel {
    fn default() -> Self {
        Self {
            model: None,
            material: None,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Zero mass means the body is static.
    pub mass: f32,
    /// Moved by the scene rather than by the simulation.
    pub kinematic: bool,
    pub enabled: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass: 0.0,
            kinematic: false,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollisionGeometry {
    Sphere { diameter: f32 },
    Box { size: Vec3 },
    TriangleMesh { model: SceneModelId, scale: Vec3 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionShape {
    pub geometry: CollisionGeometry,
    /// Offset from the node origin.
    pub position: Vec3,
    pub rotation: Quat,
    pub enabled: bool,
}

impl CollisionShape {
    fn new(geometry: CollisionGeometry, position: Vec3, rotation: Quat) -> Self {
        Self {
            geometry,
            position,
            rotation,
            enabled: true,
        }
    }

    pub fn sphere(diameter: f32, position: Vec3, rotation: Quat) -> Self {
        Self::new(CollisionGeometry::Sphere { diameter }, position, rotation)
    }

    pub fn cuboid(size: Vec3, position: Vec3, rotation: Quat) -> Self {
        Self::new(CollisionGeometry::Box { size }, position, rotation)
    }

    pub fn triangle_mesh(model: SceneModelId, scale: Vec3, position: Vec3, rotation: Quat) -> Self {
        Self::new(
            CollisionGeometry::TriangleMesh { model, scale },
            position,
            rotation,
        )
    }
}
