//! Camera for ray generation.
//!
//! A fixed pinhole looking down -Z. Pixel `(x, y)` maps to normalized
//! device coordinates `ndc_x = 2x / width - 1`, `ndc_y = 1 - 2y / height`
//! and the ray points at `(ndc_x, ndc_y, -1)` from the camera position.
//! There is no aspect correction and no sub-pixel offset.

use glint_math::{Ray, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub image_width: u32,
    pub image_height: u32,
}

impl Camera {
    pub fn new(position: Vec3, image_width: u32, image_height: u32) -> Self {
        Self {
            position,
            image_width,
            image_height,
        }
    }

    /// Normalized device coordinates of pixel `(x, y)`.
    #[inline]
    pub fn ndc(&self, x: u32, y: u32) -> (f32, f32) {
        let ndc_x = 2.0 * x as f32 / self.image_width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * y as f32 / self.image_height as f32;
        (ndc_x, ndc_y)
    }

    /// Generate the primary ray for pixel `(x, y)`, with a unit direction.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let (ndc_x, ndc_y) = self.ndc(x, y);
        Ray::new(self.position, Vec3::new(ndc_x, ndc_y, -1.0).normalize())
    }
}
