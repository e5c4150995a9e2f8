//! Zoom level stepping.
//!
//! Each zoom key multiplies or divides the level by a fixed factor. The
//! result is clamped to a configured range so repeated presses cannot
//! collapse the hexagons to nothing or overflow the canvas math.

use serde::{Deserialize, Serialize};

/// Zoom stepping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomSettings {
    /// Multiplier per zoom step
    #[serde(default = "default_factor")]
    pub factor: f64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

fn default_factor() -> f64 {
    crate::constants::DEFAULT_ZOOM_FACTOR
}

fn default_min_zoom() -> f64 {
    crate::constants::MIN_ZOOM
}

fn default_max_zoom() -> f64 {
    crate::constants::MAX_ZOOM
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            factor: default_factor(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

/// Current zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    pub level: f64,
}

impl Zoom {
    pub fn new(level: f64) -> Self {
        Self { level }
    }

    /// Zoom level 1.0.
    pub fn identity() -> Self {
        Self::new(1.0)
    }

    /// Zoom in by a factor (e.g., 1.1 for 10% zoom in).
    pub fn zoom_in(&self, factor: f64, max_zoom: f64) -> Zoom {
        Zoom::new((self.level * factor).min(max_zoom))
    }

    /// Zoom out by a factor (e.g., 1.1 for 10% zoom out).
    pub fn zoom_out(&self, factor: f64, min_zoom: f64) -> Zoom {
        Zoom::new((self.level / factor).max(min_zoom))
    }

    pub fn step_in(&self, settings: &ZoomSettings) -> Zoom {
        self.zoom_in(settings.factor, settings.max_zoom)
    }

    pub fn step_out(&self, settings: &ZoomSettings) -> Zoom {
        self.zoom_out(settings.factor, settings.min_zoom)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::identity()
    }
}
