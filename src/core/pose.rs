use glam::{Affine3A, Mat4, Quat, Vec3};

/// Position and orientation of an object or camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Camera-style pose at `eye` looking at `target` (right-handed, Y up).
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let view = Mat4::look_at_rh(eye, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        Self {
            position: eye,
            orientation: rotation.normalize(),
        }
    }

    /// Direction the pose faces (local -Z).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Express a world-space pose in the frame of `parent_world`.
    pub fn to_parent_local(&self, parent_world: &Affine3A) -> Self {
        let inverse = parent_world.inverse();
        let (_, parent_rotation, _) = parent_world.to_scale_rotation_translation();
        Self {
            position: inverse.transform_point3(self.position),
            orientation: (parent_rotation.inverse() * self.orientation).normalize(),
        }
    }

    #[inline]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.orientation, self.position)
    }
}
