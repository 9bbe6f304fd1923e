use crate::constants::{CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_Y, CAMERA_NEAR, CAMERA_TARGET};
use crate::core::Pose;
use glam::{Mat4, Vec3, Vec4};
use web_sys as web;

/// Fixed look-at perspective camera.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            target: CAMERA_TARGET,
            fov_y: CAMERA_FOV_Y,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Camera {
    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::looking_at(self.eye, self.target, Vec3::Y)
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    #[inline]
    pub fn proj(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    #[inline]
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.proj(aspect) * self.view()
    }
}

/// Compute a world-space ray from screen-space canvas coordinates.
///
/// - `canvas`: target canvas to derive dimensions/aspect
/// - `sx`, `sy`: pixel coordinates in the canvas' backing store space
///
/// Returns `(ray_origin, ray_direction)` in world space.
pub fn screen_to_world_ray(
    canvas: &web::HtmlCanvasElement,
    sx: f32,
    sy: f32,
    camera: &Camera,
) -> (Vec3, Vec3) {
    let width = canvas.width().max(1) as f32;
    let height = canvas.height().max(1) as f32;
    let ndc_x = (2.0 * sx / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height);
    let inv = camera.view_proj(width / height).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye;
    let rd = (p1 - ro).normalize();
    (ro, rd)
}
