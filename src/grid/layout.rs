//! Hexagon layout math.
//!
//! Maps grid offsets to pixel centers for flat-top hexagons and produces the
//! six vertices of each hexagon. Hexagons are spaced wider than a tight
//! tiling so neighbors are separated by a visible gap.

use serde::{Deserialize, Serialize};

use super::neighbors::Offset;

/// A point in screen (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Multipliers applied to hexagon width and height when placing centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(default = "default_spacing_x")]
    pub x: f64,
    #[serde(default = "default_spacing_y")]
    pub y: f64,
}

fn default_spacing_x() -> f64 {
    crate::constants::DEFAULT_SPACING_X
}

fn default_spacing_y() -> f64 {
    crate::constants::DEFAULT_SPACING_Y
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            x: default_spacing_x(),
            y: default_spacing_y(),
        }
    }
}

/// Cell size, zoom and spacing bundled together for a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    pub cell_size: f64,
    pub zoom: f64,
    pub spacing: Spacing,
}

impl HexLayout {
    pub fn new(cell_size: f64, zoom: f64) -> Self {
        Self {
            cell_size,
            zoom,
            spacing: Spacing::default(),
        }
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Effective hexagon radius.
    pub fn size(&self) -> f64 {
        self.cell_size * self.zoom
    }

    pub fn offset_to_pixel(&self, offset: Offset, viewport_center: Point) -> Point {
        offset_to_pixel_spaced(offset, self.cell_size, self.zoom, viewport_center, self.spacing)
    }

    pub fn vertices(&self, center: Point) -> [Point; 6] {
        hexagon_vertices(center, self.cell_size, self.zoom)
    }
}

/// Pixel center of the hexagon at `offset` with the default spacing.
pub fn offset_to_pixel(offset: Offset, cell_size: f64, zoom: f64, viewport_center: Point) -> Point {
    offset_to_pixel_spaced(offset, cell_size, zoom, viewport_center, Spacing::default())
}

/// Pixel center of the hexagon at `offset`.
///
/// `px = cx + dx * w * spacing.x`, `py = cy + dy * h * spacing.y` where
/// `w = size * sqrt(3)` and `h = size * 2`.
pub fn offset_to_pixel_spaced(
    offset: Offset,
    cell_size: f64,
    zoom: f64,
    viewport_center: Point,
    spacing: Spacing,
) -> Point {
    let size = cell_size * zoom;
    let w = size * 3f64.sqrt();
    let h = size * 2.0;
    Point::new(
        viewport_center.x + f64::from(offset.dx) * w * spacing.x,
        viewport_center.y + f64::from(offset.dy) * h * spacing.y,
    )
}

/// The six vertices of a flat-top hexagon, starting at 0 degrees and
/// proceeding in 60 degree steps.
pub fn hexagon_vertices(center: Point, cell_size: f64, zoom: f64) -> [Point; 6] {
    let size = cell_size * zoom;
    std::array::from_fn(|i| {
        let theta = ((i * 60) as f64).to_radians();
        Point::new(center.x + size * theta.cos(), center.y + size * theta.sin())
    })
}

/// Whether `point` lies inside (or on the edge of) the convex polygon.
///
/// Vertices may be in either winding order.
pub fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut sign = 0.0f64;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_origin_maps_to_center() {
        let center = Point::new(640.0, 335.0);
        let p = offset_to_pixel(Offset::ORIGIN, 20.0, 1.0, center);
        assert_eq!(p, center);
    }

    #[test]
    fn test_offset_to_pixel_spacing() {
        let center = Point::new(100.0, 50.0);
        let p = offset_to_pixel(Offset::new(1, -2), 20.0, 1.0, center);
        // w = 20 * sqrt(3), h = 40
        assert_eq!(p.x, 100.0 + 20.0 * 3f64.sqrt() * 1.75);
        assert_eq!(p.y, 50.0 + -2.0 * 40.0 * 1.5);
    }

    #[test]
    fn test_zoom_scales_distance_from_center() {
        let center = Point::new(0.0, 0.0);
        let a = offset_to_pixel(Offset::new(3, 2), 20.0, 1.0, center);
        let b = offset_to_pixel(Offset::new(3, 2), 20.0, 2.0, center);
        assert!(approx_eq(b.x, a.x * 2.0));
        assert!(approx_eq(b.y, a.y * 2.0));
    }

    #[test]
    fn test_custom_spacing() {
        let layout = HexLayout::new(10.0, 1.0).with_spacing(Spacing { x: 1.0, y: 1.0 });
        let p = layout.offset_to_pixel(Offset::new(1, 1), Point::default());
        assert!(approx_eq(p.x, 10.0 * 3f64.sqrt()));
        assert!(approx_eq(p.y, 20.0));
    }

    #[test]
    fn test_vertices_at_radius() {
        let center = Point::new(12.5, -7.0);
        let vertices = hexagon_vertices(center, 20.0, 1.1);
        assert_eq!(vertices.len(), 6);
        for v in &vertices {
            assert!((v.distance_to(&center) - 22.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_vertex_is_flat_top_corner() {
        let vertices = hexagon_vertices(Point::new(0.0, 0.0), 10.0, 1.0);
        assert!(approx_eq(vertices[0].x, 10.0));
        assert!(approx_eq(vertices[0].y, 0.0));
        // Vertices 1 and 2 share a y: the flat edge.
        assert!(approx_eq(vertices[1].y, vertices[2].y));
    }

    #[test]
    fn test_polygon_contains() {
        let center = Point::new(50.0, 50.0);
        let vertices = hexagon_vertices(center, 10.0, 1.0);
        assert!(polygon_contains(&vertices, center));
        assert!(polygon_contains(&vertices, Point::new(58.0, 50.0)));
        assert!(!polygon_contains(&vertices, Point::new(61.0, 50.0)));
        // Corner of the bounding box lies outside the hexagon.
        assert!(!polygon_contains(&vertices, Point::new(59.5, 58.5)));
    }
}
