//! Hex Space - explore and annotate colors on a hexagonal grid.
//!
//! A base color is surrounded by the colors reached by stepping its red,
//! green and blue channels, projected onto a flat-top hexagon layout. Any
//! color on the canvas can be given a name and tags, which are kept in a flat
//! JSON file.

pub mod app;
pub mod color;
pub mod config;
pub mod constants;
pub mod format;
pub mod grid;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod render;
pub mod search;
pub mod zoom_math;

pub use app::{AppError, HexSpaceApp};
pub use color::Color;
pub use grid::{Neighbor, NeighborParams, Offset, Point, generate_neighbors};
