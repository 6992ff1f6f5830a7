//! Triangle intersection for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.
//! Meshes are intersected by a linear scan over their faces.

use crate::hittable::{HitInfo, Hittable, ObjectTag};
use glint_core::Mesh;
use glint_math::{Ray, Vec3};

/// Threshold for the parallel test and the minimum accepted distance.
pub const TRIANGLE_EPSILON: f32 = 1e-6;

/// Result of a successful ray-triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Distance along the ray, in units of the ray direction
    pub t: f32,
    /// Unit normal following the triangle winding
    pub normal: Vec3,
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Hits at `t <= 1e-6` are rejected, which excludes the triangle a
/// secondary ray starts on as well as everything behind the origin.
pub fn intersect_ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < TRIANGLE_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t <= TRIANGLE_EPSILON {
        return None;
    }

    Some(TriangleHit {
        t,
        normal: edge1.cross(edge2).normalize(),
    })
}

impl Hittable for Mesh {
    /// Closest face hit, scanning faces in storage order.
    ///
    /// A later face only wins on a strictly smaller `t`, so ties go to the
    /// face stored first. NaN distances never win.
    fn hit(&self, ray: &Ray, closest: f32) -> Option<HitInfo> {
        let mut best: Option<TriangleHit> = None;
        let mut closest_so_far = closest;

        for [v0, v1, v2] in self.triangles() {
            if let Some(tri) = intersect_ray_triangle(ray, v0, v1, v2) {
                if tri.t < closest_so_far {
                    closest_so_far = tri.t;
                    best = Some(tri);
                }
            }
        }

        best.map(|tri| HitInfo {
            t: tri.t,
            position: ray.at(tri.t),
            normal: tri.normal,
            object: ObjectTag::Mesh,
        })
    }
}
