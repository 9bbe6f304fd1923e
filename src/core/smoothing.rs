use glam::{Quat, Vec3};

/// Fraction of the remaining distance covered in `dt_sec` when approaching a
/// target at `rate` per second.
///
/// Equivalent to `1 - exp(-rate * dt)`, so splitting a time span into more
/// frames converges exactly as fast as one big frame. Always in `[0, 1)`.
#[inline]
pub fn smoothing_factor(rate: f32, dt_sec: f32) -> f32 {
    if dt_sec <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt_sec).exp()
}

/// Exponentially approach `target`; never overshoots.
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt_sec: f32) -> f32 {
    current + (target - current) * smoothing_factor(rate, dt_sec)
}

#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt_sec: f32) -> Vec3 {
    current.lerp(target, smoothing_factor(rate, dt_sec))
}

/// Shortest-path rotational approach.
#[inline]
pub fn damp_quat(current: Quat, target: Quat, rate: f32, dt_sec: f32) -> Quat {
    current
        .slerp(target, smoothing_factor(rate, dt_sec))
        .normalize()
}
