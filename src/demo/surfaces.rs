use anyhow::Context;
use glam::{Quat, Vec3};

use crate::demo::HoloDemo;
use crate::events::HostContext;
use crate::material::Material;
use crate::model::Model;
use crate::platform::SpatialMeshInfo;
use crate::scene_graph::CollisionShape;

const SURFACE_MATERIAL_NAME: &str = "SpatialSurfaceWireframe";

impl HoloDemo {
    /// Creates the node for a new surface or refreshes an existing one in place.
    pub(super) fn surface_added_or_updated(
        &mut self,
        ctx: &mut HostContext<'_>,
        surface: &SpatialMeshInfo,
    ) -> anyhow::Result<()> {
        let root = self
            .surfaces_root
            .context("Surface event received before the surfaces root was created")?;
        let id = &surface.surface_id;

        // Reject bad geometry before touching the scene.
        let model = Model::from_vertex_data(id.as_str(), &surface.vertex_data, &surface.index_data)
            .with_context(|| format!("Invalid mesh for surface {}", id))?;
        log::trace!(
            "Surface mesh {}: {} vertices, {} triangles, bounds {:?}",
            model.name,
            model.vertices.len(),
            model.triangle_count(),
            model.bounding_box
        );

        let node = match ctx.scene.get_child_by_name(root, id.as_str()) {
            Some(node) => {
                log::trace!("Updating surface {}", id);
                node
            }
            None => {
                log::debug!("Adding surface {}", id);
                let node = ctx.scene.create_child(Some(root), id.as_str());
                ctx.scene.object_mut(node)?.ensure_static_model();
                node
            }
        };

        ctx.scene.set_object_translation(node, surface.bounds_center);
        ctx.scene.set_object_rotation(node, surface.bounds_rotation);

        let color = self.config.surface_color;
        let material = ctx.materials.get_or_add(SURFACE_MATERIAL_NAME, || {
            Material::from_color(SURFACE_MATERIAL_NAME, color).wireframe()
        });

        let previous_model = ctx
            .scene
            .get_object(node)
            .and_then(|object| object.static_model.as_ref())
            .and_then(|static_model| static_model.model);
        let model_id = ctx.scene.upsert_model(previous_model, model);

        let object = ctx.scene.object_mut(node)?;
        let static_model = object.ensure_static_model();
        static_model.model = Some(model_id);
        static_model.material = Some(material);
        // Late events after a stop must not bring the wireframe back.
        static_model.enabled = self.mode.shows_surfaces();

        object.ensure_rigid_body();
        object.collision_shape = Some(CollisionShape::triangle_mesh(
            model_id,
            Vec3::ONE,
            Vec3::ZERO,
            Quat::IDENTITY,
        ));

        Ok(())
    }
}
