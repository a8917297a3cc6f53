//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera projection, motion tuning, wall layout)
//! are consolidated here. Options serialize to/from TOML so hosts can ship
//! tuned presets.

mod camera;
mod layout;
mod motion;

use std::path::Path;

pub use camera::CameraOptions;
pub use layout::LayoutOptions;
pub use motion::MotionOptions;
use serde::{Deserialize, Serialize};

use crate::error::WallError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Choreography and settle tuning.
    pub motion: MotionOptions,
    /// Wall grid layout parameters.
    pub layout: LayoutOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, WallError> {
        let content = std::fs::read_to_string(path).map_err(WallError::Io)?;
        toml::from_str(&content)
            .map_err(|e| WallError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), WallError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WallError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(WallError::Io)?;
        }
        std::fs::write(path, content).map_err(WallError::Io)
    }
}
