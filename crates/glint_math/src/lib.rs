// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Mirror `direction` about the surface normal `normal`.
///
/// Computes `d - 2 (d . n) n`. The normal is expected to be unit length;
/// the result has the same length as `direction` in that case.
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Returns true if any component of `v` is NaN.
#[inline]
pub fn has_nan(v: Vec3) -> bool {
    v.x.is_nan() || v.y.is_nan() || v.z.is_nan()
}
