//! OBJ-subset mesh loading.
//!
//! Only two record types are understood:
//!
//! - `v <x> <y> <z>` appends a vertex position
//! - `f <a> <b> <c>` appends a triangle with 1-based vertex indices
//!
//! Every other line is ignored. A `v` or `f` record with the wrong number
//! of fields, or with fields that do not parse as numbers, is skipped as
//! well; a partial parse is accepted, never an error.
//!
//! After parsing, a winding correction pass orients every face towards a
//! fixed reference viewpoint in front of the model. This is a single
//! viewpoint heuristic: it gives consistent results for closed, roughly
//! convex, single-object meshes facing that point. It is not a general
//! outward-normal solution, and faces of concave or multi-lobed geometry
//! that look away from the viewpoint get flipped inwards.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use glint_math::Vec3;
use thiserror::Error;

use crate::mesh::{Face, Mesh, MeshError};

/// Default reference viewpoint for winding correction.
pub const REFERENCE_VIEWPOINT: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Errors that can occur during mesh loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {path:?}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Loader settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Point every face is oriented towards after parsing.
    pub reference_viewpoint: Vec3,
    /// Run the winding correction pass at all.
    pub correct_winding: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            reference_viewpoint: REFERENCE_VIEWPOINT,
            correct_winding: true,
        }
    }
}

/// What happened while loading a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines that were neither `v` nor `f` records (comments, blanks, `vn`, ...).
    pub ignored_lines: usize,
    /// `v`/`f` records dropped for a wrong field count or bad number.
    pub malformed_records: usize,
    /// Faces whose winding was reversed by the correction pass.
    pub flipped_faces: usize,
}

/// A freshly loaded mesh together with its load statistics.
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub mesh: Mesh,
    pub stats: LoadStats,
}

/// A single recognized line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Record {
    Vertex(Vec3),
    /// Raw 1-based indices, as written in the file.
    Face([i64; 3]),
}

enum LineKind {
    Record(Record),
    Malformed,
    Other,
}

/// Classify one line of input.
fn parse_line(line: &str) -> LineKind {
    let mut tokens = line.split_whitespace();
    let kind = match tokens.next() {
        Some(kind @ ("v" | "f")) => kind,
        _ => return LineKind::Other,
    };

    let fields: Vec<&str> = tokens.collect();
    if fields.len() != 3 {
        return LineKind::Malformed;
    }

    let record = if kind == "v" {
        parse_triple::<f32>(&fields).map(|[x, y, z]| Record::Vertex(Vec3::new(x, y, z)))
    } else {
        parse_triple::<i64>(&fields).map(Record::Face)
    };

    record.map_or(LineKind::Malformed, LineKind::Record)
}

fn parse_triple<T: std::str::FromStr + Copy + Default>(fields: &[&str]) -> Option<[T; 3]> {
    let mut out = [T::default(); 3];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = field.parse().ok()?;
    }
    Some(out)
}

/// Convert a 1-based file index to a 0-based face index.
fn to_zero_based(face: usize, raw: i64, vertex_count: usize) -> Result<u32, MeshError> {
    let index = raw.saturating_sub(1);
    if index < 0 || index as u64 >= vertex_count as u64 {
        return Err(MeshError::FaceIndexOutOfRange {
            face,
            index,
            vertex_count,
        });
    }
    Ok(index as u32)
}

/// Orient every face of `mesh` towards `viewpoint`.
///
/// A face whose normal points away from the viewpoint (negative dot
/// product with the centroid-to-viewpoint vector) gets its last two
/// indices swapped. Degenerate faces have a zero normal and are left
/// alone. Returns the number of flipped faces.
pub fn correct_winding(mesh: &mut Mesh, viewpoint: Vec3) -> usize {
    let flips: Vec<bool> = mesh
        .faces()
        .iter()
        .map(|face| {
            let normal = mesh.face_normal(face);
            let view = (viewpoint - mesh.face_centroid(face)).normalize_or_zero();
            normal.dot(view) < 0.0
        })
        .collect();

    let mut flipped = 0;
    for (idx, (face, flip)) in mesh.faces_mut().iter_mut().zip(flips).enumerate() {
        if flip {
            face.flip();
            flipped += 1;
            log::debug!("Flipped face {}: {:?}", idx, face.indices);
        }
    }
    flipped
}

/// Mesh loader for the `v`/`f` text format.
#[derive(Debug, Clone, Default)]
pub struct ObjLoader {
    options: LoadOptions,
}

impl ObjLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load a mesh from a file.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> LoadResult<LoadedMesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let loaded = self.read(BufReader::new(file))?;
        log::info!(
            "Loaded {} vertices, {} faces from {:?} ({} flipped, {} malformed records skipped)",
            loaded.mesh.vertex_count(),
            loaded.mesh.face_count(),
            path,
            loaded.stats.flipped_faces,
            loaded.stats.malformed_records
        );
        Ok(loaded)
    }

    /// Parse a mesh from in-memory text.
    pub fn parse(&self, content: &str) -> LoadResult<LoadedMesh> {
        self.read(content.as_bytes())
    }

    /// Parse a mesh from any buffered reader.
    ///
    /// Lines are decoded lossily so stray non-UTF-8 bytes only spoil the
    /// line they appear on.
    pub fn read<R: BufRead>(&self, mut reader: R) -> LoadResult<LoadedMesh> {
        let mut stats = LoadStats::default();
        let mut vertices = Vec::new();
        let mut raw_faces = Vec::new();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = String::from_utf8_lossy(&buf);

            match parse_line(&line) {
                LineKind::Record(Record::Vertex(v)) => vertices.push(v),
                LineKind::Record(Record::Face(f)) => raw_faces.push(f),
                LineKind::Malformed => {
                    stats.malformed_records += 1;
                    log::trace!("Skipping malformed record at line {}: {:?}", line_no, line.trim_end());
                }
                LineKind::Other => stats.ignored_lines += 1,
            }
        }

        let vertex_count = vertices.len();
        let faces = raw_faces
            .iter()
            .enumerate()
            .map(|(face, raw)| -> Result<Face, MeshError> {
                Ok(Face::new(
                    to_zero_based(face, raw[0], vertex_count)?,
                    to_zero_based(face, raw[1], vertex_count)?,
                    to_zero_based(face, raw[2], vertex_count)?,
                ))
            })
            .collect::<Result<Vec<_>, MeshError>>()?;

        let mut mesh = Mesh::new(vertices, faces)?;
        if self.options.correct_winding {
            stats.flipped_faces = correct_winding(&mut mesh, self.options.reference_viewpoint);
        }

        Ok(LoadedMesh { mesh, stats })
    }
}

/// Load a mesh file with default options.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    ObjLoader::default().load(path).map(|loaded| loaded.mesh)
}

/// Parse mesh text with default options.
pub fn parse_obj(content: &str) -> LoadResult<Mesh> {
    ObjLoader::default().parse(content).map(|loaded| loaded.mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::face_normal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!("glint_loader_{}_{}_{}", std::process::id(), n, name))
    }

    fn view_dot(mesh: &Mesh, face: &Face) -> f32 {
        let [v0, v1, v2] = mesh.face_vertices(face);
        let view = (REFERENCE_VIEWPOINT - mesh.face_centroid(face)).normalize();
        face_normal(v0, v1, v2).dot(view)
    }

    #[test]
    fn test_counts_and_zero_based_indices() {
        let src = "\
# a quad split in two
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
f 1 2 3
f 1 3 4
";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces()[0], Face::new(0, 1, 2));
        assert_eq!(mesh.faces()[1], Face::new(0, 2, 3));
        for face in mesh.faces() {
            assert!(face.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        }
    }

    #[test]
    fn test_malformed_records_skipped() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 2
v 1 2 3 4
v a b c
vn 0 0 1
f 1 2
f 1/1 2/2 3/3
f 1 2 3
";
        let loaded = ObjLoader::default().parse(src).unwrap();
        assert_eq!(loaded.mesh.vertex_count(), 3);
        assert_eq!(loaded.mesh.face_count(), 1);
        assert_eq!(loaded.stats.malformed_records, 5);
        assert_eq!(loaded.stats.ignored_lines, 1);
    }

    #[test]
    fn test_tabs_and_extra_spaces() {
        let mesh = parse_obj("v\t0 0  0\nv 1\t0 0\n  v 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_out_of_range_face_is_error() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Mesh(MeshError::FaceIndexOutOfRange { index: 3, vertex_count: 3, .. })
        ));

        // Index 0 does not exist in a 1-based format
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Mesh(MeshError::FaceIndexOutOfRange { index: -1, .. })
        ));
    }

    #[test]
    fn test_extreme_face_index_is_error() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -9223372036854775808 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Mesh(MeshError::FaceIndexOutOfRange { index: i64::MIN, face: 0, .. })
        ));

        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9223372036854775807\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Mesh(MeshError::FaceIndexOutOfRange { index: 9223372036854775806, .. })
        ));
    }

    #[test]
    fn test_face_facing_away_is_flipped() {
        // Clockwise seen from +Z, so the raw normal points to -Z
        let src = "v 0 0 0\nv 0 1 0\nv 1 0 0\nf 1 2 3\n";
        let loaded = ObjLoader::default().parse(src).unwrap();
        let face = loaded.mesh.faces()[0];

        assert_eq!(loaded.stats.flipped_faces, 1);
        assert_eq!(face, Face::new(0, 2, 1));
        assert!(view_dot(&loaded.mesh, &face) >= 0.0);
    }

    #[test]
    fn test_face_facing_viewpoint_is_kept() {
        let loaded = ObjLoader::default()
            .parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
            .unwrap();
        assert_eq!(loaded.stats.flipped_faces, 0);
        assert_eq!(loaded.mesh.faces()[0], Face::new(0, 1, 2));
    }

    #[test]
    fn test_degenerate_face_not_flipped() {
        let loaded = ObjLoader::default()
            .parse("v 0 0 0\nv 1 0 0\nv 2 0 0\nf 1 2 3\n")
            .unwrap();
        assert_eq!(loaded.stats.flipped_faces, 0);
        assert_eq!(loaded.mesh.faces()[0], Face::new(0, 1, 2));
    }

    #[test]
    fn test_winding_correction_can_be_disabled() {
        let loader = ObjLoader::new(LoadOptions {
            correct_winding: false,
            ..Default::default()
        });
        let loaded = loader.parse("v 0 0 0\nv 0 1 0\nv 1 0 0\nf 1 2 3\n").unwrap();
        assert_eq!(loaded.stats.flipped_faces, 0);
        assert_eq!(loaded.mesh.faces()[0], Face::new(0, 1, 2));
    }

    #[test]
    fn test_load_from_file() {
        let _ = env_logger::builder().is_test(true).try_init();
        let path = temp_path("tri.obj");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let path = temp_path("does_not_exist.obj");
        let err = load_obj(&path).unwrap_err();
        match err {
            LoadError::FileOpen { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected FileOpen, got {other:?}"),
        }
    }
}
