//! Glint Renderer - CPU ray tracing
//!
//! A deterministic Whitted-style tracer: one primary ray per pixel,
//! Möller–Trumbore triangle tests against every mesh face, a bounded
//! ground plane, hard shadows from a single point light and a mirror
//! bounce on the mesh up to a fixed depth.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_obj, Scene};
//! use glint_renderer::{render, RenderConfig};
//!
//! let scene = Scene::new(load_obj("cow.obj")?);
//! let image = render(&scene, &RenderConfig::default());
//! image.save_png("cow.png")?;
//! ```

mod camera;
mod cancel;
mod config;
mod ground;
mod hittable;
mod renderer;
mod shading;
mod tracer;
mod triangle;

pub use camera::Camera;
pub use cancel::CancelToken;
pub use config::{ConfigError, RenderConfig};
pub use hittable::{HitInfo, Hittable, ObjectTag};
pub use renderer::{
    color_to_rgb, render, render_parallel, render_serial, render_with_cancel, ImageBuffer,
    RenderError, RenderResult,
};
pub use shading::{Color, Shader, ShadingConfig};
pub use tracer::trace_scene;
pub use triangle::{intersect_ray_triangle, TriangleHit, TRIANGLE_EPSILON};

/// Re-export common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
