use std::cell::{Cell, Ref, RefCell};

use glam::{Mat4, Quat, Vec3};

/// Local placement of a node plus a lazily refreshed world matrix.
///
/// The world matrix is only valid after `Scene::update_transforms` has propagated
/// the hierarchy for the current frame.
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: f32,

    local_matrix: RefCell<Mat4>,
    world_matrix: RefCell<Mat4>,
    local_dirty: Cell<bool>,
    world_dirty: Cell<bool>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            local_matrix: RefCell::new(Mat4::IDENTITY),
            world_matrix: RefCell::new(Mat4::IDENTITY),
            local_dirty: Cell::new(true),
            world_dirty: Cell::new(true),
        }
    }

    pub fn local_matrix(&self) -> Ref<'_, Mat4> {
        if self.local_dirty.get() {
            self.local_matrix
                .replace(Mat4::from_scale_rotation_translation(
                    Vec3::splat(self.scale),
                    self.rotation,
                    self.translation,
                ));
            self.local_dirty.set(false);
        }

        self.local_matrix.borrow()
    }

    pub fn world_matrix(&self) -> Ref<'_, Mat4> {
        self.world_matrix.borrow()
    }

    #[allow(dead_code)]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.borrow().w_axis.truncate()
    }

    pub(super) fn set_world_matrix(&self, world_matrix: Mat4) {
        self.world_matrix.replace(world_matrix);
        self.world_dirty.set(false);
    }

    fn invalidate_local(&self) {
        self.local_dirty.set(true);
        self.world_dirty.set(true);
    }

    pub(super) fn invalidate_world(&self) {
        self.world_dirty.set(true);
    }

    pub fn is_world_dirty(&self) -> bool {
        self.world_dirty.get()
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.invalidate_local();
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.invalidate_local();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.invalidate_local();
    }

    #[allow(dead_code)]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    #[allow(dead_code)]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[allow(dead_code)]
    pub fn scale(&self) -> f32 {
        self.scale
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_matrix_follows_setters() {
        let mut transform = Transform::from_translation(Vec3::new(0.0, -1.0, 0.0));
        transform.set_scale(20.0);

        let point = transform.local_matrix().transform_point3(Vec3::X);
        assert!(point.abs_diff_eq(Vec3::new(20.0, -1.0, 0.0), 1e-5));

        transform.set_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let point = transform.local_matrix().transform_point3(Vec3::X);
        assert!(point.abs_diff_eq(Vec3::new(0.0, -1.0, -20.0), 1e-4));
    }

    #[test]
    fn setters_mark_world_dirty() {
        let mut transform = Transform::default();
        transform.set_world_matrix(Mat4::IDENTITY);
        assert!(!transform.is_world_dirty());

        transform.set_translation(Vec3::ONE);
        assert!(transform.is_world_dirty());
        assert_eq!(transform.translation(), Vec3::ONE);
    }
}
