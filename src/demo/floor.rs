use glam::Quat;

use crate::config::DemoConfig;
use crate::scene_graph::{CollisionShape, ObjectId, Primitive, RigidBody, Scene, Shape};

/// Static floor plane with a thin box collider just below its surface.
///
/// Nothing prevents building a second floor; callers invoke this once.
pub fn build_floor(scene: &mut Scene, config: &DemoConfig) -> anyhow::Result<ObjectId> {
    let floor = scene.create_child(None, "Floor");
    scene.set_object_translation(floor, config.floor_position);
    scene.set_object_scale(floor, config.floor_scale);

    let model_node = scene.create_child(Some(floor), "FloorModel");
    scene.object_mut(model_node)?.shape = Some(Shape::new(Primitive::Plane, config.floor_color));

    let object = scene.object_mut(floor)?;
    object.rigid_body = Some(RigidBody {
        kinematic: true,
        ..Default::default()
    });
    object.collision_shape = Some(CollisionShape::cuboid(
        config.floor_collision_size,
        config.floor_collision_offset,
        Quat::IDENTITY,
    ));

    log::info!("Built floor at {}", config.floor_position);

    Ok(floor)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::material::Color;
    use crate::scene_graph::components::CollisionGeometry;

    #[test]
    fn floor_is_a_kinematic_box() {
        let mut scene = Scene::new();
        let floor = build_floor(&mut scene, &DemoConfig::default()).unwrap();

        let object = scene.get_object(floor).unwrap();
        assert_eq!(object.transform.translation(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(object.transform.scale(), 20.0);
        assert!(object.rigid_body.as_ref().unwrap().kinematic);

        let shape = object.collision_shape.as_ref().unwrap();
        assert_eq!(
            shape.geometry,
            CollisionGeometry::Box {
                size: Vec3::new(20.0, 0.1, 20.0)
            }
        );
        assert_eq!(shape.position, Vec3::new(0.0, -0.05, 0.0));

        let plane = scene.get_object(scene.children(floor)[0]).unwrap();
        let plane = plane.shape.as_ref().unwrap();
        assert_eq!(plane.primitive, Primitive::Plane);
        assert_eq!(plane.color, Color::WHITE);
    }

    #[test]
    fn building_twice_creates_two_floors() {
        let mut scene = Scene::new();
        let first = build_floor(&mut scene, &DemoConfig::default()).unwrap();
        let second = build_floor(&mut scene, &DemoConfig::default()).unwrap();

        assert_ne!(first, second);
        assert_eq!(scene.root_objects().count(), 2);
    }
}
