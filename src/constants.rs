//! Global constants for the Hex Space application

/// Color units added per neighbor step
pub const DEFAULT_STEP: i32 = 8;

/// Maximum taxicab distance of a neighbor from the base color
pub const DEFAULT_MAX_TAXICAB: i32 = 8;

/// Half-range of each neighbor axis
pub const DEFAULT_AXIS_RANGE: i32 = 8;

/// Upper bounds accepted from the configuration file
pub const MAX_AXIS_RANGE: i32 = 64;
pub const MAX_TAXICAB: i32 = 3 * MAX_AXIS_RANGE;
pub const MAX_STEP: i32 = 255;

/// Hexagon radius in pixels at zoom 1.0
pub const DEFAULT_HEX_SIZE: f64 = 20.0;

/// Horizontal center spacing, in hexagon widths
pub const DEFAULT_SPACING_X: f64 = 1.75;

/// Vertical center spacing, in hexagon heights
pub const DEFAULT_SPACING_Y: f64 = 1.5;

/// Zoom multiplier applied per zoom-in / zoom-out
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.1;

pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 20.0;

/// Default canvas size
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;

/// Height reserved below the canvas for the search bar
pub const SEARCH_BAR_HEIGHT: u32 = 50;

/// Default annotation store file, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "colors.json";

/// Outline widths in pixels
pub const OUTLINE_WIDTH: f64 = 1.0;
pub const HIGHLIGHT_OUTLINE_WIDTH: f64 = 3.0;
