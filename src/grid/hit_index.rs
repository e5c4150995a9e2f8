//! Spatial index from rendered hexagons back to their colors.
//!
//! Built alongside a render pass. Offsets map to the last color drawn there,
//! and pixel queries return the topmost hexagon under the point.

use std::collections::HashMap;

use super::layout::{Point, polygon_contains};
use super::neighbors::Offset;
use crate::color::Color;

#[derive(Debug, Clone)]
struct Region {
    color: Color,
    center: Point,
    radius: f64,
    vertices: [Point; 6],
}

/// Lookup structure for click-to-annotate and search highlighting.
#[derive(Debug, Clone, Default)]
pub struct HitIndex {
    by_offset: HashMap<Offset, Color>,
    // Draw order; later entries are on top.
    regions: Vec<Region>,
}

impl HitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drawn hexagon. Replaces any color previously at `offset`.
    pub fn insert(&mut self, offset: Offset, color: Color, center: Point, vertices: [Point; 6]) {
        let radius = vertices
            .iter()
            .map(|v| v.distance_to(&center))
            .fold(0.0, f64::max);
        self.by_offset.insert(offset, color);
        self.regions.push(Region {
            color,
            center,
            radius,
            vertices,
        });
    }

    /// Color currently shown at a grid offset.
    pub fn color_at_offset(&self, offset: Offset) -> Option<Color> {
        self.by_offset.get(&offset).copied()
    }

    /// Color of the topmost hexagon containing `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<Color> {
        self.regions
            .iter()
            .rev()
            .filter(|r| r.center.distance_to(&point) <= r.radius)
            .find(|r| polygon_contains(&r.vertices, point))
            .map(|r| r.color)
    }

    /// Number of distinct offsets.
    pub fn len(&self) -> usize {
        self.by_offset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_offset.is_empty()
    }
}
