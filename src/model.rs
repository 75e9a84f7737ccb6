use anyhow::bail;
use glam::Vec3;

use crate::math::AABB;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounding_box: AABB,
}

impl Model {
    pub fn from_vertex_data(
        name: impl Into<String>,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> anyhow::Result<Model> {
        let name = name.into();

        if indices.len() % 3 != 0 {
            bail!(
                "Index count {} of {} is not a multiple of three",
                indices.len(),
                name
            );
        }

        if let Some(index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            bail!(
                "Index {} of {} is out of range ({} vertices)",
                index,
                name,
                vertices.len()
            );
        }

        let bounding_box = AABB::from_points(vertices.iter().map(|v| v.position))
            .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO));

        Ok(Model {
            name,
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
            bounding_box,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
