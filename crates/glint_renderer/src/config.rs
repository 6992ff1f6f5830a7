//! Render configuration.
//!
//! Every field defaults to the fixed constants of the standard scene, so
//! a config file only needs to list what it changes.

use std::path::{Path, PathBuf};

use glint_core::{GroundPlane, Placement, PointLight, Scene};
use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::Camera;
use crate::shading::ShadingConfig;

/// Errors that can occur while reading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Camera position; the camera always looks down -Z
    pub camera_position: Vec3,
    /// The scene's point light
    pub light: PointLight,
    /// Height and size of the ground square
    pub ground: GroundPlane,
    /// Model placement applied to the loaded mesh
    pub placement: Placement,
    /// Shading constants
    pub shading: ShadingConfig,
    /// Fan scanlines out over the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            camera_position: Vec3::new(0.0, 0.0, 3.0),
            light: PointLight::default(),
            ground: GroundPlane::default(),
            placement: Placement::default(),
            shading: ShadingConfig::default(),
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The camera this config describes.
    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_position, self.width, self.height)
    }

    /// Apply the light, ground and placement of this config to `scene`.
    pub fn configure_scene(&self, scene: Scene) -> Scene {
        scene
            .with_light(self.light)
            .with_ground(self.ground)
            .with_placement(self.placement)
    }
}
