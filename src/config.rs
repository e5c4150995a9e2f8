//! Configuration file support for Hex Space.
//!
//! This module provides serialization and deserialization of application
//! settings: neighbor parameters, layout, zoom stepping, render budget,
//! viewport, keybindings and the location of the annotation store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::{HexLayout, NeighborParams, Spacing};
use crate::keybindings::KeyBindings;
use crate::render::{RenderBudget, Viewport};
use crate::zoom_math::ZoomSettings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Hexagon geometry settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Hexagon radius at zoom 1.0
    #[serde(default = "default_hex_size")]
    pub hex_size: f64,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default)]
    pub zoom: ZoomSettings,
}

fn default_hex_size() -> f64 {
    crate::constants::DEFAULT_HEX_SIZE
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hex_size: default_hex_size(),
            spacing: Spacing::default(),
            zoom: ZoomSettings::default(),
        }
    }
}

impl LayoutConfig {
    /// Layout for a render pass at `zoom`.
    pub fn hex_layout(&self, zoom: f64) -> HexLayout {
        HexLayout::new(self.hex_size, zoom).with_spacing(self.spacing)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Annotation store file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default)]
    pub neighbors: NeighborParams,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub render: RenderBudget,

    #[serde(default)]
    pub viewport: Viewport,

    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(crate::constants::DEFAULT_STORE_FILE)
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            store_path: default_store_path(),
            neighbors: NeighborParams::default(),
            layout: LayoutConfig::default(),
            render: RenderBudget::default(),
            viewport: Viewport::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make rendering meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use crate::constants::{MAX_AXIS_RANGE, MAX_STEP, MAX_TAXICAB};

        let neighbors = &self.neighbors;
        if neighbors.axis_range > MAX_AXIS_RANGE {
            return Err(ConfigError::invalid(format!(
                "neighbors.axis_range must be at most {}",
                MAX_AXIS_RANGE
            )));
        }
        if neighbors.max_taxicab > MAX_TAXICAB {
            return Err(ConfigError::invalid(format!(
                "neighbors.max_taxicab must be at most {}",
                MAX_TAXICAB
            )));
        }
        if !(-MAX_STEP..=MAX_STEP).contains(&neighbors.step) {
            return Err(ConfigError::invalid(format!(
                "neighbors.step must be within -{0}..={0}",
                MAX_STEP
            )));
        }
        if !(self.layout.hex_size.is_finite() && self.layout.hex_size > 0.0) {
            return Err(ConfigError::invalid("layout.hex_size must be positive"));
        }
        let zoom = &self.layout.zoom;
        if !(zoom.factor.is_finite() && zoom.factor > 1.0) {
            return Err(ConfigError::invalid("layout.zoom.factor must be greater than 1"));
        }
        if !(zoom.min_zoom > 0.0 && zoom.min_zoom <= zoom.max_zoom) {
            return Err(ConfigError::invalid(
                "layout.zoom.min_zoom must be positive and not above max_zoom",
            ));
        }
        Ok(())
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "hexspace-config.json"
    }

    /// Get the default config file path for auto-load.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("hexspace").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("hexspace")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A setting has an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut config = AppConfig::new();
        config.render.max_cells = Some(500);
        config.layout.spacing = Spacing { x: 2.0, y: 2.0 };
        let json = config.to_json().unwrap();
        assert_eq!(AppConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config = AppConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config, AppConfig::new());
        assert_eq!(config.neighbors, NeighborParams::new(8, 8, 8));
        assert_eq!(config.layout.hex_size, 20.0);
        assert_eq!(config.layout.spacing, Spacing { x: 1.75, y: 1.5 });
        assert_eq!(config.store_path, PathBuf::from("colors.json"));
    }

    #[test]
    fn test_version_too_new() {
        let err = AppConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_json(r#"{"version": 1, "layout": {"hex_size": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            AppConfig::from_json(r#"{"version": 1, "layout": {"zoom": {"factor": 0.5}}}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_axis_range_bounded() {
        let err = AppConfig::from_json(r#"{"version": 1, "neighbors": {"axis_range": 800000000}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let config =
            AppConfig::from_json(r#"{"version": 1, "neighbors": {"axis_range": 64}}"#).unwrap();
        assert_eq!(config.neighbors.axis_range, 64);
    }

    #[test]
    fn test_max_taxicab_bounded() {
        let err =
            AppConfig::from_json(r#"{"version": 1, "neighbors": {"max_taxicab": 2147483647}}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        // Negative means an empty neighborhood, not an error.
        let config =
            AppConfig::from_json(r#"{"version": 1, "neighbors": {"max_taxicab": -1}}"#).unwrap();
        assert_eq!(config.neighbors.max_taxicab, -1);
    }

    #[test]
    fn test_step_bounded() {
        for step in ["256", "-256", "2147483647"] {
            let json = format!(r#"{{"version": 1, "neighbors": {{"step": {}}}}}"#, step);
            let err = AppConfig::from_json(&json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
        }
        let config =
            AppConfig::from_json(r#"{"version": 1, "neighbors": {"step": -255}}"#).unwrap();
        assert_eq!(config.neighbors.step, -255);
    }

    #[test]
    fn test_log_level_names() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level.to_level_filter(), log::LevelFilter::Debug);
    }
}
