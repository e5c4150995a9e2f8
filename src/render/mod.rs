//! Scene building and rasterization.

mod raster;
mod scene;

pub use raster::{RenderError, rasterize, save_png};
pub use scene::{HexCell, RenderBudget, Scene, Viewport, build_scene};
