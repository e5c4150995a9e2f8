//! Software rasterizer that paints a scene onto an RGB image.

use std::path::Path;

use image::{Rgb, RgbImage};
use thiserror::Error;

use super::scene::{HexCell, Scene, Viewport};
use crate::color::Color;
use crate::constants::{HIGHLIGHT_OUTLINE_WIDTH, OUTLINE_WIDTH};
use crate::grid::{Point, polygon_contains};

/// Errors that can occur when rasterizing or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Encoding or file error from the image crate
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Viewport has no drawable area
    #[error("Viewport {width}x{height} has no drawable canvas")]
    EmptyViewport { width: u32, height: u32 },
}

fn rgb(color: Color) -> Rgb<u8> {
    Rgb(color.to_array())
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    p.distance_to(&Point::new(a.x + t * abx, a.y + t * aby))
}

fn draw_cell(img: &mut RgbImage, cell: &HexCell) {
    let (outline, width) = if cell.highlighted {
        (Color::RED, HIGHLIGHT_OUTLINE_WIDTH)
    } else {
        (Color::BLACK, OUTLINE_WIDTH)
    };
    let half = width / 2.0;

    let (min_x, max_x, min_y, max_y) = cell.vertices.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(x0, x1, y0, y1), v| (x0.min(v.x), x1.max(v.x), y0.min(v.y), y1.max(v.y)),
    );
    let clip = |v: f64, limit: u32| v.clamp(0.0, f64::from(limit)) as u32;
    let (x0, x1) = (clip(min_x - half, img.width()), clip(max_x + half + 1.0, img.width()));
    let (y0, y1) = (clip(min_y - half, img.height()), clip(max_y + half + 1.0, img.height()));

    for py in y0..y1 {
        for px in x0..x1 {
            let p = Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
            let on_edge = (0..6).any(|i| {
                distance_to_segment(p, cell.vertices[i], cell.vertices[(i + 1) % 6]) <= half
            });
            if on_edge {
                img.put_pixel(px, py, rgb(outline));
            } else if polygon_contains(&cell.vertices, p) {
                img.put_pixel(px, py, rgb(cell.color));
            }
        }
    }
}

/// Paint `scene` onto a white canvas the size of the viewport's drawable area.
pub fn rasterize(scene: &Scene, viewport: &Viewport) -> Result<RgbImage, RenderError> {
    let (width, height) = (viewport.width, viewport.canvas_height());
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let mut img = RgbImage::from_pixel(width, height, rgb(Color::WHITE));
    for cell in scene.cells() {
        draw_cell(&mut img, cell);
    }
    Ok(img)
}

/// Rasterize `scene` and write it as a PNG file.
pub fn save_png(scene: &Scene, viewport: &Viewport, path: &Path) -> Result<(), RenderError> {
    let img = rasterize(scene, viewport)?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    log::info!(
        "Wrote {}x{} canvas with {} hexagon(s) to {:?}",
        img.width(),
        img.height(),
        scene.cells().len(),
        path
    );
    Ok(())
}
