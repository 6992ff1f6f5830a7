//! Hittable trait and HitInfo for ray-object intersection.

use glint_math::{Ray, Vec3};

/// Which scene object a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTag {
    Ground,
    Mesh,
}

/// Record of a ray-object intersection.
///
/// Only lives for the duration of a trace or shade call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Geometric normal at the intersection, following the face winding
    pub normal: Vec3,
    /// What was hit
    pub object: ObjectTag,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection of `ray` with this object that is closer
    /// than `closest`.
    fn hit(&self, ray: &Ray, closest: f32) -> Option<HitInfo>;
}
