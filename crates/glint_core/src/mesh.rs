//! Triangle mesh representation.
//!
//! A mesh is an ordered list of vertex positions plus an ordered list of
//! triangular faces indexing into it. Both orders are load order. Every
//! face index is checked against the vertex count on construction, so the
//! rest of the pipeline can index without bounds surprises.

use glint_math::{Mat4, Vec3};
use thiserror::Error;

/// Errors raised when mesh invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },
}

/// A triangular face: three 0-based vertex indices.
///
/// Index order defines the winding and therefore the normal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub indices: [u32; 3],
}

impl Face {
    /// Create a face from three 0-based vertex indices.
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { indices: [a, b, c] }
    }

    /// Reverse the winding by swapping the last two indices.
    pub fn flip(&mut self) {
        self.indices.swap(1, 2);
    }
}

/// A mesh consisting of vertex positions and triangle faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Create a new mesh, checking that every face index is in `[0, vertex_count)`.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&bad) = face
                .indices
                .iter()
                .find(|&&i| i as usize >= vertex_count)
            {
                return Err(MeshError::FaceIndexOutOfRange {
                    face: face_idx,
                    index: bad as i64,
                    vertex_count,
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    /// A mesh with no vertices and no faces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Vertex positions in load order.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Faces in load order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable access to the faces. Only winding may change through this,
    /// indices stay valid because the vertex list is untouched.
    pub(crate) fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The three corner positions of `face`, in winding order.
    #[inline]
    pub fn face_vertices(&self, face: &Face) -> [Vec3; 3] {
        let [a, b, c] = face.indices;
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Iterate over all triangles as corner triplets, in storage order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.faces.iter().map(move |f| self.face_vertices(f))
    }

    /// Centroid of a face (average of its three corners).
    pub fn face_centroid(&self, face: &Face) -> Vec3 {
        let [v0, v1, v2] = self.face_vertices(face);
        (v0 + v1 + v2) / 3.0
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for pos in &self.vertices {
            min = min.min(*pos);
            max = max.max(*pos);
        }
        Some((min, max))
    }

    /// Copy of this mesh with every vertex moved by `matrix`.
    ///
    /// Faces are kept as-is, so a matrix with a negative determinant
    /// would reverse the apparent winding.
    pub fn transformed(&self, matrix: &Mat4) -> Mesh {
        Mesh {
            vertices: self
                .vertices
                .iter()
                .map(|v| matrix.transform_point3(*v))
                .collect(),
            faces: self.faces.clone(),
        }
    }
}
