//! Recursive Whitted-style shading.
//!
//! Each call resolves one ray: direct Lambertian light from the single
//! point light with a hard shadow test, plus a mirror bounce on the mesh
//! that recurses until the depth limit. The ground is matte and never
//! spawns a bounce.

use glint_core::Scene;
use glint_math::{has_nan, reflect, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::hittable::ObjectTag;
use crate::tracer::trace_scene;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Shading constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Deepest recursion level that still traces
    pub max_depth: u32,
    /// Weight of the mirror bounce on mesh surfaces
    pub reflectivity: f32,
    /// Multiplier applied to shadowed ground
    pub shadow_factor: f32,
    /// Flat color of the ground plane
    pub ground_color: Color,
    /// Returned when a ray escapes the scene
    pub background: Color,
    /// Returned once the recursion limit is exceeded
    pub max_depth_color: Color,
    /// How far secondary rays start off the surface
    pub surface_bias: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            reflectivity: 0.5,
            shadow_factor: 0.2,
            ground_color: Color::splat(0.5),
            background: Color::new(0.2, 0.3, 0.3),
            max_depth_color: Color::splat(0.3),
            surface_bias: 0.01,
        }
    }
}

/// Shades rays against a read-only scene.
///
/// Holds only shared references, so one shader can be used from many
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Shader<'a> {
    scene: &'a Scene,
    config: &'a ShadingConfig,
}

impl<'a> Shader<'a> {
    pub fn new(scene: &'a Scene, config: &'a ShadingConfig) -> Self {
        Self { scene, config }
    }

    /// Returns true if something in the scene blocks the path from
    /// `point` to `light_pos`.
    ///
    /// The probe ray starts `surface_bias` towards the light so it does
    /// not hit the surface `point` lies on. Only hits closer than the light
    /// count as occluders.
    pub fn is_in_shadow(&self, point: Vec3, light_pos: Vec3) -> bool {
        let probe = Ray::towards(point, light_pos);
        if probe.direction == Vec3::ZERO {
            return false;
        }

        let probe = probe.nudged(probe.direction, self.config.surface_bias);
        let light_distance = (light_pos - probe.origin).length();

        trace_scene(self.scene, &probe).is_some_and(|hit| hit.t < light_distance)
    }

    /// Color seen along `ray`, `depth` bounces away from the camera.
    ///
    /// The result is not clamped. The mirror bounce starts `surface_bias`
    /// off the surface on the side it leaves from, which is against the
    /// stored normal when a back face was hit.
    pub fn shade(&self, ray: &Ray, depth: u32) -> Color {
        if depth > self.config.max_depth {
            return self.config.max_depth_color;
        }

        let hit = match trace_scene(self.scene, ray) {
            Some(hit) if !has_nan(hit.normal) => hit,
            _ => return self.config.background,
        };

        let light = &self.scene.light;
        match hit.object {
            ObjectTag::Ground => {
                let mut color = self.config.ground_color;
                if self.is_in_shadow(hit.position, light.position) {
                    color *= self.config.shadow_factor;
                }
                color
            }
            ObjectTag::Mesh => {
                let mut color = Color::ZERO;
                let normal = hit.normal.normalize();

                if !self.is_in_shadow(hit.position, light.position) {
                    let light_dir = (light.position - hit.position).normalize_or_zero();
                    color += normal.dot(light_dir).max(0.0) * light.color;
                }

                if let Some(bounce) = mirror_bounce(ray, hit.position, normal, self.config.surface_bias) {
                    color += self.config.reflectivity * self.shade(&bounce, depth + 1);
                }

                color
            }
        }
    }
}

/// Mirror ray leaving `position`, or `None` when the reflected direction
/// is NaN.
///
/// The origin is lifted by `bias` along `normal`, flipped to the side the
/// reflected ray travels into.
fn mirror_bounce(ray: &Ray, position: Vec3, normal: Vec3, bias: f32) -> Option<Ray> {
    let reflected = reflect(ray.direction, normal).normalize();
    if has_nan(reflected) {
        return None;
    }

    let side = if reflected.dot(normal) < 0.0 { -normal } else { normal };
    Some(Ray::new(position + side * bias, reflected))
}
