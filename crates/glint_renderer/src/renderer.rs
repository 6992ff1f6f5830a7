//! Render loop and output image.
//!
//! One primary ray per pixel, shaded at depth 0 and written as clamped
//! 8-bit RGB. Rows are independent, so the parallel loop hands whole
//! scanlines to rayon and produces the same bytes as the serial one.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use glint_core::Scene;
use glint_math::Interval;
use rayon::prelude::*;
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::shading::{Color, Shader};

/// Errors that can stop a render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("render cancelled after {completed_rows} of {total_rows} rows")]
    Cancelled {
        completed_rows: usize,
        total_rows: usize,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Convert a shading result to 8-bit RGB.
///
/// Each channel is scaled by 255 and clamped to `[0, 255]`; NaN becomes 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f32| Interval::BYTE.clamp(c * 255.0) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Row-major RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.pixels[(y * self.width + x) as usize] = rgb;
    }

    /// Flat `RGBRGB...` byte view of the pixels.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write the image as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }

    /// Write the image as an ASCII PPM (P3).
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for [r, g, b] in &self.pixels {
            writeln!(writer, "{} {} {}", r, g, b)?;
        }

        Ok(())
    }
}

/// Shade one scanline into `row`.
fn render_row(shader: &Shader, camera: &Camera, y: u32, row: &mut [[u8; 3]]) {
    for (x, pixel) in row.iter_mut().enumerate() {
        let ray = camera.get_ray(x as u32, y);
        *pixel = color_to_rgb(shader.shade(&ray, 0));
    }
}

/// Stop check polled before each scanline.
type StopFn<'a> = &'a (dyn Fn() -> bool + Sync);

/// Shade `image` row by row on the calling thread. Returns the number of
/// rows written before `stop` fired.
fn fill_serial(image: &mut ImageBuffer, shader: &Shader, camera: &Camera, stop: StopFn) -> usize {
    let width = image.width as usize;
    if width == 0 {
        return 0;
    }

    let mut completed = 0;
    for (y, row) in image.pixels.chunks_mut(width).enumerate() {
        if stop() {
            break;
        }
        render_row(shader, camera, y as u32, row);
        completed += 1;
    }
    completed
}

/// Shade `image` with one rayon task per scanline. Returns the number of
/// rows written.
///
/// Rows write disjoint slices of the buffer, so no synchronization is
/// needed beyond the completed-row counter.
fn fill_parallel(image: &mut ImageBuffer, shader: &Shader, camera: &Camera, stop: StopFn) -> usize {
    let width = image.width as usize;
    if width == 0 {
        return 0;
    }

    let completed = AtomicUsize::new(0);
    image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            if stop() {
                return;
            }
            render_row(shader, camera, y as u32, row);
            completed.fetch_add(1, Ordering::Relaxed);
        });
    completed.into_inner()
}

/// Run the selected loop and turn an early stop into an error.
fn render_checked(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
    parallel: bool,
) -> RenderResult<ImageBuffer> {
    let camera = config.camera();
    let shader = Shader::new(scene, &config.shading);
    let mut image = ImageBuffer::new(config.width, config.height);
    if image.pixels.is_empty() {
        return Ok(image);
    }

    let stop = || cancel.is_cancelled();
    let completed_rows = if parallel {
        fill_parallel(&mut image, &shader, &camera, &stop)
    } else {
        fill_serial(&mut image, &shader, &camera, &stop)
    };

    let total_rows = config.height as usize;
    if completed_rows < total_rows {
        return Err(RenderError::Cancelled {
            completed_rows,
            total_rows,
        });
    }
    Ok(image)
}

/// Render the scene to an image buffer, serial or parallel per `config.parallel`.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let camera = config.camera();
    let shader = Shader::new(scene, &config.shading);
    let mut image = ImageBuffer::new(config.width, config.height);

    if config.parallel {
        fill_parallel(&mut image, &shader, &camera, &|| false);
    } else {
        fill_serial(&mut image, &shader, &camera, &|| false);
    }

    log_render(scene, config, start);
    image
}

/// Render the scene, polling `cancel` before every scanline.
pub fn render_with_cancel(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> RenderResult<ImageBuffer> {
    let start = Instant::now();
    let image = render_checked(scene, config, cancel, config.parallel)?;
    log_render(scene, config, start);
    Ok(image)
}

/// Single-threaded render loop.
pub fn render_serial(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> RenderResult<ImageBuffer> {
    render_checked(scene, config, cancel, false)
}

/// Render loop with one rayon task per scanline.
pub fn render_parallel(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> RenderResult<ImageBuffer> {
    render_checked(scene, config, cancel, true)
}

fn log_render(scene: &Scene, config: &RenderConfig, start: Instant) {
    log::debug!(
        "Rendered {}x{} ({} faces, {}) in {:?}",
        config.width,
        config.height,
        scene.mesh().face_count(),
        if config.parallel { "parallel" } else { "serial" },
        start.elapsed()
    );
}
