//! Ray intersection with the bounded ground plane.

use crate::hittable::{HitInfo, Hittable, ObjectTag};
use glint_core::GroundPlane;
use glint_math::{Interval, Ray};

/// Rays whose direction has a smaller y magnitude count as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

impl Hittable for GroundPlane {
    fn hit(&self, ray: &Ray, closest: f32) -> Option<HitInfo> {
        if ray.direction.y.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.height - ray.origin.y) / ray.direction.y;
        if !Interval::new(0.0, closest).surrounds(t) {
            return None;
        }

        let position = ray.at(t);
        let footprint = self.footprint();
        if !footprint.contains(position.x) || !footprint.contains(position.z) {
            return None;
        }

        Some(HitInfo {
            t,
            position,
            normal: self.normal(),
            object: ObjectTag::Ground,
        })
    }
}
