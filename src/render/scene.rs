//! Render pass: turn a center color into drawable hexagons.
//!
//! The scene is rebuilt from scratch on every search and zoom change. It
//! keeps the cells in generation order (later cells are drawn on top) and
//! the hit index used to map clicks back to colors.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::grid::{HexLayout, HitIndex, NeighborParams, Neighbors, Offset, Point};

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Strip at the bottom reserved for the search bar
    #[serde(default = "default_search_bar_height")]
    pub search_bar_height: u32,
}

fn default_width() -> u32 {
    crate::constants::DEFAULT_VIEWPORT_WIDTH
}

fn default_height() -> u32 {
    crate::constants::DEFAULT_VIEWPORT_HEIGHT
}

fn default_search_bar_height() -> u32 {
    crate::constants::SEARCH_BAR_HEIGHT
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            search_bar_height: default_search_bar_height(),
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            search_bar_height: default_search_bar_height(),
        }
    }

    /// Height of the drawable canvas above the search bar.
    pub fn canvas_height(&self) -> u32 {
        self.height.saturating_sub(self.search_bar_height)
    }

    /// Where the center hexagon is drawn.
    pub fn center(&self) -> Point {
        Point::new(
            f64::from(self.width) / 2.0,
            f64::from(self.canvas_height()) / 2.0,
        )
    }

    /// Whether a hexagon of radius `size` at `center` touches the canvas.
    pub fn intersects(&self, center: Point, size: f64) -> bool {
        center.x + size >= 0.0
            && center.x - size <= f64::from(self.width)
            && center.y + size >= 0.0
            && center.y - size <= f64::from(self.canvas_height())
    }
}

/// Limits on how much a single render pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderBudget {
    /// Maximum number of hexagons, taken in generation order
    #[serde(default)]
    pub max_cells: Option<usize>,
    /// Skip hexagons that lie entirely outside the canvas
    #[serde(default)]
    pub cull_offscreen: bool,
}

impl RenderBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }
}

/// One drawable hexagon.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub color: Color,
    pub offset: Offset,
    pub center: Point,
    pub vertices: [Point; 6],
    pub highlighted: bool,
}

/// Everything produced by one render pass.
#[derive(Debug, Clone)]
pub struct Scene {
    center_color: Color,
    size: f64,
    cells: Vec<HexCell>,
    index: HitIndex,
    dropped: usize,
}

impl Scene {
    pub fn center_color(&self) -> Color {
        self.center_color
    }

    /// Hexagon radius used for this pass.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Cells in draw order.
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    pub fn index(&self) -> &HitIndex {
        &self.index
    }

    /// Neighbors that were generated but not drawn because of the budget.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Color under a pixel, or `None` over empty canvas.
    pub fn hit_test(&self, point: Point) -> Option<Color> {
        self.index.hit_test(point)
    }

    /// Mark every cell drawn with `color`. Returns how many were marked.
    pub fn highlight(&mut self, color: Color) -> usize {
        let mut count = 0;
        for cell in self.cells.iter_mut().filter(|c| c.color == color) {
            cell.highlighted = true;
            count += 1;
        }
        count
    }
}

/// Build the scene for `center_color`.
pub fn build_scene(
    center_color: Color,
    params: &NeighborParams,
    layout: &HexLayout,
    viewport: &Viewport,
    budget: &RenderBudget,
) -> Scene {
    let origin = viewport.center();
    let size = layout.size();
    let mut cells = Vec::new();
    let mut index = HitIndex::new();
    let mut dropped = 0;

    for neighbor in Neighbors::new(center_color, *params) {
        if budget.max_cells.is_some_and(|max| cells.len() >= max) {
            dropped += 1;
            continue;
        }
        let center = layout.offset_to_pixel(neighbor.offset, origin);
        if budget.cull_offscreen && !viewport.intersects(center, size) {
            dropped += 1;
            continue;
        }
        let vertices = layout.vertices(center);
        index.insert(neighbor.offset, neighbor.color, center, vertices);
        cells.push(HexCell {
            color: neighbor.color,
            offset: neighbor.offset,
            center,
            vertices,
            highlighted: false,
        });
    }

    log::debug!(
        "Rendered {} hexagon(s) around {} at zoom {:.3} ({} dropped)",
        cells.len(),
        center_color,
        layout.zoom,
        dropped
    );

    Scene {
        center_color,
        size,
        cells,
        index,
        dropped,
    }
}
