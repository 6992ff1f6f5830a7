//! Nearest-hit queries against the whole scene.
//!
//! There is no acceleration structure: every ray scans every mesh face,
//! then tests the ground plane. The order is fixed (mesh faces in storage
//! order, ground last) and a candidate only replaces the current best on a
//! strictly smaller distance, so equal distances resolve to the mesh.

use crate::hittable::{HitInfo, Hittable};
use glint_core::Scene;
use glint_math::Ray;

/// Find the closest thing `ray` hits in `scene`, if anything.
pub fn trace_scene(scene: &Scene, ray: &Ray) -> Option<HitInfo> {
    let mesh_hit = scene.mesh().hit(ray, f32::INFINITY);
    let closest = mesh_hit.map_or(f32::INFINITY, |hit| hit.t);

    scene.ground.hit(ray, closest).or(mesh_hit)
}
