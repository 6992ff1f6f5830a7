//! Scene description for the ray tracer.
//!
//! A scene is one mesh, a bounded horizontal ground plane and a single
//! point light. It is read-only while a frame renders; swapping the mesh
//! happens between frames through [`Scene::load_mesh`].

use std::path::Path;

use glint_math::{EulerRot, Interval, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::loader::{LoadResult, ObjLoader};
use crate::mesh::Mesh;

/// A finite square of the plane `y = height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlane {
    /// Height of the plane.
    pub height: f32,
    /// Half the side length of the square, centred on the origin in x and z.
    pub half_extent: f32,
}

impl GroundPlane {
    /// The x/z range covered by the plane.
    pub fn footprint(&self) -> Interval {
        Interval::centered(self.half_extent)
    }

    /// Upward unit normal.
    pub fn normal(&self) -> Vec3 {
        Vec3::Y
    }
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            height: -1.0,
            half_extent: 10.0,
        }
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub position: Vec3,
    /// RGB intensity, white by default
    pub color: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            color: Vec3::ONE,
        }
    }
}

/// Model placement supplied by the host application.
///
/// Rotation angles are in degrees and are applied X, then Y, then Z,
/// after a uniform scale and before the translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub translation: Vec3,
    pub rotation_degrees: Vec3,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Placement {
    /// Returns true if applying this placement changes nothing.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        let r = self.rotation_degrees;
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            r.x.to_radians(),
            r.y.to_radians(),
            r.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.translation)
    }
}

/// The complete scene handed to the tracer.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Mesh as loaded, in model space
    source: Mesh,
    /// `source` moved by `placement`
    mesh: Mesh,
    placement: Placement,
    pub ground: GroundPlane,
    pub light: PointLight,
}

impl Scene {
    /// A scene with the default ground plane and light.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            source: mesh.clone(),
            mesh,
            ..Default::default()
        }
    }

    /// Set the light.
    pub fn with_light(mut self, light: PointLight) -> Self {
        self.light = light;
        self
    }

    /// Set the ground plane.
    pub fn with_ground(mut self, ground: GroundPlane) -> Self {
        self.ground = ground;
        self
    }

    /// Place the mesh in the world, replacing any earlier placement.
    ///
    /// A non-positive scale is ignored with a warning since it would
    /// collapse the mesh or turn the corrected winding inside out.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        if placement.scale <= 0.0 {
            log::warn!("Ignoring placement with non-positive scale {}", placement.scale);
            return self;
        }
        self.placement = placement;
        self.mesh = self.placed(&self.source);
        self
    }

    /// The mesh in world space.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Replace the mesh. The current placement is applied to the new mesh.
    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = self.placed(&mesh);
        self.source = mesh;
    }

    /// Load a mesh file and install it in place of the current mesh.
    ///
    /// On failure the previous mesh stays installed and the error is
    /// returned so the caller can report it.
    pub fn load_mesh<P: AsRef<Path>>(&mut self, loader: &ObjLoader, path: P) -> LoadResult<()> {
        let loaded = loader.load(path)?;
        self.set_mesh(loaded.mesh);
        Ok(())
    }

    fn placed(&self, mesh: &Mesh) -> Mesh {
        if self.placement.is_identity() {
            mesh.clone()
        } else {
            mesh.transformed(&self.placement.to_matrix())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_obj;
    use crate::mesh::Face;

    fn triangle() -> Mesh {
        Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![Face::new(0, 1, 2)]).unwrap()
    }

    #[test]
    fn test_default_scene_constants() {
        let scene = Scene::new(Mesh::empty());
        assert_eq!(scene.ground.height, -1.0);
        assert_eq!(scene.ground.footprint(), Interval::new(-10.0, 10.0));
        assert_eq!(scene.light.position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(scene.light.color, Vec3::ONE);
    }

    #[test]
    fn test_placement_matrix_order() {
        let placement = Placement {
            translation: Vec3::new(2.5, 0.0, 0.0),
            rotation_degrees: Vec3::new(0.0, 90.0, 0.0),
            scale: 0.5,
        };
        // X axis: scaled to 0.5, rotated about Y onto -Z, then moved
        let p = placement.to_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(2.5, 0.0, -0.5)).length() < 1e-5);
    }

    #[test]
    fn test_with_placement_moves_mesh() {
        let scene = Scene::new(triangle()).with_placement(Placement {
            translation: Vec3::new(0.0, 1.0, 0.0),
            ..Default::default()
        });
        assert_eq!(scene.mesh().vertices()[0], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_placement_replaces_not_stacks() {
        let up = Placement {
            translation: Vec3::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let scene = Scene::new(triangle()).with_placement(up).with_placement(up);
        assert_eq!(scene.mesh().vertices()[0], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_non_positive_scale_ignored() {
        let scene = Scene::new(triangle()).with_placement(Placement {
            scale: -1.0,
            ..Default::default()
        });
        assert_eq!(scene.mesh(), &triangle());
        assert!(scene.placement().is_identity());
    }

    #[test]
    fn test_set_mesh_keeps_placement() {
        let mut scene = Scene::new(Mesh::empty()).with_placement(Placement {
            translation: Vec3::new(0.0, 0.0, -2.0),
            ..Default::default()
        });
        scene.set_mesh(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap());
        assert_eq!(scene.mesh().vertices()[0], Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_failed_load_keeps_previous_mesh() {
        let mut scene = Scene::new(triangle());
        let missing = std::env::temp_dir().join("glint_scene_missing_mesh.obj");

        assert!(scene.load_mesh(&ObjLoader::default(), &missing).is_err());
        assert_eq!(scene.mesh(), &triangle());
    }

    #[test]
    fn test_successful_load_replaces_mesh() {
        let path = std::env::temp_dir().join(format!("glint_scene_{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n").unwrap();

        let mut scene = Scene::new(triangle());
        scene.load_mesh(&ObjLoader::default(), &path).unwrap();
        assert_eq!(scene.mesh().face_count(), 2);
        assert_eq!(scene.mesh().vertex_count(), 4);

        std::fs::remove_file(&path).unwrap();
    }
}
