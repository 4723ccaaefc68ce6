//! Configuration for map rendering.
//!
//! Every section has defaults matching the Bogor angkot map, so an empty
//! TOML document is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drawing::EmitterConfig;
use crate::error::{LanemapError, LoadError, Result};
use crate::io::ShapesColumns;
use crate::operations::{CornerConfig, EndPointPolicy, LaneBase};
use crate::transform::TransformConfig;

/// Top-level configuration of a [`RenderMap`](crate::pipeline::RenderMap) run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub transform: TransformConfig,
    pub corners: CornerConfig,
    pub lane_base: LaneBase,
    pub emitter: EmitterConfig,
    pub end_points: EndPointPolicy,
    /// Adds the raw-segment overlay to the per-route drawings.
    pub debug_overlay: bool,
    pub columns: ShapesColumns,
}

impl MapConfig {
    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Toml` on invalid TOML or unknown value shapes.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LoadError::from(e).into())
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `LanemapError::Io` if the file cannot be read, otherwise the
    /// errors of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LanemapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
