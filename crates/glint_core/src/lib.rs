//! Glint Core - Mesh data model and scene description.
//!
//! This crate provides:
//!
//! - **Mesh types**: `Mesh`, `Face` with validated vertex indices
//! - **OBJ loading**: `v`/`f` subset parser with winding correction
//! - **Normals**: flat face normals and averaged vertex normals
//! - **Scene**: the mesh plus a bounded ground plane and a point light
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_obj, Scene};
//!
//! let mesh = load_obj("cow.obj")?;
//! println!("Loaded {} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
//! let scene = Scene::new(mesh);
//! ```

pub mod loader;
pub mod mesh;
pub mod normals;
pub mod scene;

// Re-export commonly used types
pub use loader::{
    correct_winding, load_obj, parse_obj, LoadError, LoadOptions, LoadResult, LoadStats,
    LoadedMesh, ObjLoader, REFERENCE_VIEWPOINT,
};
pub use mesh::{Face, Mesh, MeshError};
pub use normals::{corner_normals, face_normal, vertex_normals, ShadingMode};
pub use scene::{GroundPlane, Placement, PointLight, Scene};
