use glam::{Quat, Vec3};
use rand::rngs::StdRng;

use crate::config::DemoConfig;
use crate::math::AABB;
use crate::scene_graph::{CollisionShape, ObjectId, Primitive, RigidBody, Scene, Shape};

/// Frame-time accumulator that yields a random spawn position each time the
/// interval elapses.
pub struct Spawner {
    interval: f32,
    volume: AABB,
    elapsed: f32,
    rng: StdRng,
}

impl Spawner {
    pub fn new(interval: f32, volume: AABB, rng: StdRng) -> Self {
        Self {
            interval,
            volume,
            elapsed: 0.0,
            rng,
        }
    }

    /// The accumulator restarts from zero after a spawn, so a single long
    /// frame yields at most one position.
    pub fn tick(&mut self, time_step: f32) -> Option<Vec3> {
        self.elapsed += time_step;
        if self.elapsed < self.interval {
            return None;
        }

        self.elapsed = 0.0;
        Some(self.volume.random_point(&mut self.rng))
    }
}

/// Ball node at `position` with a sphere visual on a child node and a
/// dynamic sphere body on the node itself.
pub fn spawn_ball(
    scene: &mut Scene,
    config: &DemoConfig,
    position: Vec3,
) -> anyhow::Result<ObjectId> {
    let ball = scene.create_child(None, "Ball");
    scene.set_object_translation(ball, position);
    scene.set_object_scale(ball, config.ball_scale);

    let model_node = scene.create_child(Some(ball), "BallModel");
    scene.object_mut(model_node)?.shape = Some(Shape::new(Primitive::Sphere, config.ball_color));

    let object = scene.object_mut(ball)?;
    object.rigid_body = Some(RigidBody {
        mass: config.ball_mass,
        ..Default::default()
    });
    object.collision_shape = Some(CollisionShape::sphere(1.0, Vec3::ZERO, Quat::IDENTITY));

    Ok(ball)
}
