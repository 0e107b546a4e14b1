//! Router configuration.

use crate::export::ExportOptions;
use crate::shapes::{HandleMetrics, PathColors, PathData};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Behaviour and appearance of an [`InteractionRouter`](crate::InteractionRouter).
///
/// Field names are camelCase in JSON; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterConfig {
    /// Emit `active_path_changed` on every move during a gesture.
    pub notify_while_moving: bool,
    /// Whether the delete handle removes paths.
    pub allow_delete: bool,
    /// Paths added when the base image finishes loading.
    pub default_paths: Vec<PathData>,
    /// Default path to activate after loading.
    pub default_active_path_index: Option<usize>,
    pub colors: PathColors,
    /// Handle radius in pixels.
    pub handle_radius: f64,
    /// Distance of the delete and resize handles from the bounding box.
    pub handle_offset: f64,
    /// Radius of the default close-near-first-point drawing rule.
    pub close_radius: f64,
    pub export: ExportOptions,
}

impl Default for RouterConfig {
    fn default() -> Self {
        let metrics = HandleMetrics::default();
        Self {
            notify_while_moving: false,
            allow_delete: true,
            default_paths: Vec::new(),
            default_active_path_index: None,
            colors: PathColors::default(),
            handle_radius: metrics.radius,
            handle_offset: metrics.offset,
            close_radius: 10.0,
            export: ExportOptions::default(),
        }
    }
}

impl RouterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn handle_metrics(&self) -> HandleMetrics {
        HandleMetrics {
            radius: self.handle_radius,
            offset: self.handle_offset,
        }
    }
}
