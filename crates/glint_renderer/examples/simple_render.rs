//! Simple ray tracer example.
//!
//! Renders a small pyramid above the ground plane and saves to PPM format.

use glint_core::{parse_obj, Scene};
use glint_renderer::{render, RenderConfig};
use std::fs::File;
use std::io::BufWriter;

const PYRAMID: &str = "\
# square base at y = -0.5, apex at y = 0.7
v -0.6 -0.5 0.6
v 0.6 -0.5 0.6
v 0.6 -0.5 -0.6
v -0.6 -0.5 -0.6
v 0.0 0.7 0.0
f 1 2 5
f 2 3 5
f 3 4 5
f 4 1 5
f 1 4 3
f 1 3 2
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = Scene::new(parse_obj(PYRAMID)?);
    println!(
        "Scene built in {:?} ({} faces)",
        start.elapsed(),
        scene.mesh().face_count()
    );

    let config = RenderConfig::default().with_resolution(400, 300);
    println!("Rendering {}x{}...", config.width, config.height);

    let start = std::time::Instant::now();
    let image = render(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    image.write_ppm(BufWriter::new(File::create(filename)?))?;
    println!("Saved to {}", filename);

    Ok(())
}
