use glam::Vec3;

use crate::material::Color;
use crate::math::AABB;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Seconds of frame time between two balls.
    pub spawn_interval: f32,
    pub spawn_volume: AABB,
    pub ball_scale: f32,
    pub ball_mass: f32,
    pub ball_color: Color,

    pub floor_position: Vec3,
    pub floor_scale: f32,
    pub floor_color: Color,
    pub floor_collision_size: Vec3,
    pub floor_collision_offset: Vec3,

    pub mapping_extent: Vec3,
    pub surface_color: Color,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1.0,
            spawn_volume: AABB::new(Vec3::new(-0.3, -0.3, 2.0), Vec3::new(0.3, 0.3, 5.0)),
            ball_scale: 0.1,
            ball_mass: 0.1,
            ball_color: Color::BLUE,

            floor_position: Vec3::new(0.0, -1.0, 0.0),
            floor_scale: 20.0,
            floor_color: Color::WHITE,
            floor_collision_size: Vec3::new(20.0, 0.1, 20.0),
            floor_collision_offset: Vec3::new(0.0, -0.05, 0.0),

            mapping_extent: Vec3::new(10.0, 10.0, 10.0),
            surface_color: Color::GREEN.with_alpha(0.5),
        }
    }
}
