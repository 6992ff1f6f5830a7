use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Camera rays and the
/// secondary rays spawned during shading are normalized by their builders.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray starting at `from` and pointing at `to`, with a unit direction.
    ///
    /// Coincident points yield a zero direction rather than NaN.
    pub fn towards(from: Vec3, to: Vec3) -> Self {
        Self::new(from, (to - from).normalize_or_zero())
    }

    /// Copy of this ray with the origin pushed `distance` along `offset_dir`.
    ///
    /// Used to lift secondary rays off the surface they start on.
    pub fn nudged(&self, offset_dir: Vec3, distance: f32) -> Self {
        Self::new(self.origin + offset_dir * distance, self.direction)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
