//! Face and vertex normal derivation.
//!
//! Normals are derived data and are never cached on the mesh; callers
//! recompute them after every load. The ray tracer does not use these,
//! it takes its normal from the intersection itself.

use glint_math::Vec3;

use crate::mesh::{Face, Mesh};

/// How per-corner normals are chosen for the rasterized preview path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Every corner of a face gets the face normal.
    Flat,
    /// Every corner gets the averaged normal of its vertex.
    #[default]
    Smooth,
}

/// Unit normal of the triangle `(v0, v1, v2)` following its winding.
///
/// Degenerate triangles yield `Vec3::ZERO` instead of NaN.
#[inline]
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

impl Mesh {
    /// Unit normal of one face of this mesh.
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        let [v0, v1, v2] = self.face_vertices(face);
        face_normal(v0, v1, v2)
    }
}

/// Per-vertex normals: the average of the normals of all adjacent faces.
///
/// The result is indexed like `mesh.vertices()`. A vertex no face refers
/// to keeps a zero normal. Degenerate faces contribute a zero vector but
/// still count towards adjacency.
pub fn vertex_normals(mesh: &Mesh) -> Vec<Vec3> {
    let vertex_count = mesh.vertex_count();
    let mut sums = vec![Vec3::ZERO; vertex_count];
    let mut counts = vec![0u32; vertex_count];

    for face in mesh.faces() {
        let normal = mesh.face_normal(face);
        for &i in &face.indices {
            sums[i as usize] += normal;
            counts[i as usize] += 1;
        }
    }

    sums.iter()
        .zip(&counts)
        .map(|(&sum, &count)| {
            if count > 0 {
                sum / count as f32
            } else {
                Vec3::ZERO
            }
        })
        .collect()
}

/// Normals for each face corner, three per face in face order.
pub fn corner_normals(mesh: &Mesh, mode: ShadingMode) -> Vec<[Vec3; 3]> {
    match mode {
        ShadingMode::Flat => mesh
            .faces()
            .iter()
            .map(|face| [mesh.face_normal(face); 3])
            .collect(),
        ShadingMode::Smooth => {
            let per_vertex = vertex_normals(mesh);
            mesh.faces()
                .iter()
                .map(|face| face.indices.map(|i| per_vertex[i as usize]))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles folded along the x axis: one in the XY plane, one in XZ.
    fn folded() -> Mesh {
        Mesh::new(
            vec![
                Vec3::ZERO,
                Vec3::X,
                Vec3::Y,
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(5.0, 5.0, 5.0), // unused
            ],
            vec![Face::new(0, 1, 2), Face::new(0, 1, 3)],
        )
        .unwrap()
    }

    #[test]
    fn test_face_normal_ccw() {
        let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_face_normal_degenerate_is_zero() {
        let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(n, Vec3::ZERO);

        let n = face_normal(Vec3::ONE, Vec3::ONE, Vec3::ONE);
        assert_eq!(n, Vec3::ZERO);
    }

    #[test]
    fn test_vertex_normals_average() {
        let mesh = folded();
        let normals = vertex_normals(&mesh);

        assert_eq!(normals.len(), mesh.vertex_count());
        // Shared edge vertices average +Z and +Y
        assert!((normals[0] - Vec3::new(0.0, 0.5, 0.5)).length() < 1e-6);
        assert!((normals[1] - Vec3::new(0.0, 0.5, 0.5)).length() < 1e-6);
        // Vertices on a single face keep that face's normal
        assert!((normals[2] - Vec3::Z).length() < 1e-6);
        assert!((normals[3] - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_isolated_vertex_has_zero_normal() {
        let normals = vertex_normals(&folded());
        assert_eq!(normals[4], Vec3::ZERO);
    }

    #[test]
    fn test_corner_normals_flat_vs_smooth() {
        let mesh = folded();

        let flat = corner_normals(&mesh, ShadingMode::Flat);
        assert_eq!(flat.len(), 2);
        for n in flat[0] {
            assert!((n - Vec3::Z).length() < 1e-6);
        }

        let smooth = corner_normals(&mesh, ShadingMode::Smooth);
        assert!((smooth[0][0] - Vec3::new(0.0, 0.5, 0.5)).length() < 1e-6);
        assert!((smooth[0][2] - Vec3::Z).length() < 1e-6);
    }
}
