//! CLI command implementations.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use glint_core::{LoadedMesh, Mesh, ObjLoader, Scene};
use glint_math::Vec3;
use glint_renderer::{render_with_cancel, CancelToken, ImageBuffer, RenderConfig};

/// Arguments of `glint render`.
pub struct RenderArgs {
    pub mesh: PathBuf,
    pub output: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub config: Option<PathBuf>,
    pub serial: bool,
    pub deadline_ms: Option<u64>,
}

/// Render a mesh file to an image.
pub fn render(args: RenderArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load render config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.serial {
        config.parallel = false;
    }

    let mut scene = config.configure_scene(Scene::new(Mesh::empty()));
    if let Err(e) = scene.load_mesh(&ObjLoader::default(), &args.mesh) {
        log::warn!("{e}; rendering without a mesh");
    }

    let cancel = match args.deadline_ms {
        Some(ms) => CancelToken::with_timeout(Duration::from_millis(ms)),
        None => CancelToken::new(),
    };

    println!(
        "Rendering {}x{} ({} faces)...",
        config.width,
        config.height,
        scene.mesh().face_count()
    );
    let start = Instant::now();
    let image = render_with_cancel(&scene, &config, &cancel)?;
    println!("Rendered in {:?}", start.elapsed());

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}

fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        image.save_png(path)?;
    } else {
        image.write_ppm(BufWriter::new(File::create(path)?))?;
    }
    Ok(())
}

/// Print statistics about a mesh file.
pub fn inspect(path: &Path) -> Result<()> {
    let loaded = ObjLoader::default()
        .load(path)
        .with_context(|| format!("Failed to load mesh {}", path.display()))?;

    println!("Glint Mesh Inspector");
    println!("────────────────────");
    println!("File:         {}", path.display());
    print!("{}", MeshReport::new(&loaded));
    Ok(())
}

/// Summary of a loaded mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    pub vertices: usize,
    pub faces: usize,
    pub flipped_faces: usize,
    pub skipped_lines: usize,
    /// Faces with zero area
    pub degenerate_faces: usize,
    /// Vertices no face refers to
    pub isolated_vertices: usize,
    pub bounds: Option<(Vec3, Vec3)>,
}

impl MeshReport {
    pub fn new(loaded: &LoadedMesh) -> Self {
        let mesh = &loaded.mesh;

        let mut referenced = vec![false; mesh.vertex_count()];
        for face in mesh.faces() {
            for &i in &face.indices {
                referenced[i as usize] = true;
            }
        }

        Self {
            vertices: mesh.vertex_count(),
            faces: mesh.face_count(),
            flipped_faces: loaded.stats.flipped_faces,
            skipped_lines: loaded.stats.ignored_lines + loaded.stats.malformed_records,
            degenerate_faces: mesh
                .faces()
                .iter()
                .filter(|face| mesh.face_normal(face) == Vec3::ZERO)
                .count(),
            isolated_vertices: referenced.iter().filter(|&&used| !used).count(),
            bounds: mesh.bounds(),
        }
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vertices:     {}", self.vertices)?;
        writeln!(f, "Faces:        {}", self.faces)?;
        writeln!(f, "Flipped:      {}", self.flipped_faces)?;
        writeln!(f, "Skipped:      {} lines", self.skipped_lines)?;
        writeln!(f, "Degenerate:   {}", self.degenerate_faces)?;
        writeln!(f, "Isolated:     {}", self.isolated_vertices)?;
        match self.bounds {
            Some((min, max)) => writeln!(f, "Bounds:       {min} .. {max}"),
            None => writeln!(f, "Bounds:       (empty)"),
        }
    }
}
