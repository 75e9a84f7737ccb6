//! The spatial-mapping service seam.

mod simulated;

use std::fmt;

use glam::{Quat, Vec3};

use crate::model::Vertex;

pub use simulated::{SimulatedMappingConfig, SimulatedSpatialMapping};

/// Platform identifier of a physical surface, stable across updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One reconstructed surface as delivered by the platform. Vertex positions
/// are relative to the bounds center and rotation.
#[derive(Debug, Clone)]
pub struct SpatialMeshInfo {
    pub surface_id: SurfaceId,
    pub bounds_center: Vec3,
    pub bounds_rotation: Quat,
    pub vertex_data: Vec<Vertex>,
    pub index_data: Vec<u32>,
}

pub trait SpatialMapping {
    /// Asks the platform to begin scanning a box of `extent` around the
    /// viewer. Returns immediately; `HostEvent::MappingStarted` follows once
    /// the platform is running, then surface events.
    fn request_start(&mut self, extent: Vec3);

    /// Asks the platform to stop emitting surface events. Events already in
    /// flight may still be delivered.
    fn request_stop(&mut self);
}
