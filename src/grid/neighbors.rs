//! Neighbor generation in stepped RGB space.
//!
//! A base color is surrounded by a diamond (octahedron) of colors reached by
//! stepping each channel independently. Every included `(dx, dy, dz)` triple
//! becomes one neighbor whose screen position is `(dx, dy)`; the blue axis
//! only shows up in the color, so several neighbors share a grid offset.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Logical hexagon position relative to the center hexagon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ORIGIN: Offset = Offset::new(0, 0);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self::new(dx, dy)
    }
}

/// A generated color and the grid offset it is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub color: Color,
    pub offset: Offset,
}

/// Parameters controlling the size and spacing of the neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborParams {
    /// Color units added per axis step
    #[serde(default = "default_step")]
    pub step: i32,
    /// Largest allowed `|dx| + |dy| + |dz|`
    #[serde(default = "default_max_taxicab")]
    pub max_taxicab: i32,
    /// Each axis ranges over `-axis_range..=axis_range`
    #[serde(default = "default_axis_range")]
    pub axis_range: i32,
}

fn default_step() -> i32 {
    crate::constants::DEFAULT_STEP
}

fn default_max_taxicab() -> i32 {
    crate::constants::DEFAULT_MAX_TAXICAB
}

fn default_axis_range() -> i32 {
    crate::constants::DEFAULT_AXIS_RANGE
}

impl Default for NeighborParams {
    fn default() -> Self {
        Self {
            step: default_step(),
            max_taxicab: default_max_taxicab(),
            axis_range: default_axis_range(),
        }
    }
}

impl NeighborParams {
    pub fn new(step: i32, max_taxicab: i32, axis_range: i32) -> Self {
        Self {
            step,
            max_taxicab,
            axis_range,
        }
    }

    /// Whether the triple lies inside the taxicab cutoff.
    ///
    /// The cube bound is not checked here; callers iterate inside it.
    #[inline]
    pub fn includes(&self, dx: i32, dy: i32, dz: i32) -> bool {
        // Summed in i64 so axis ranges near i32::MAX cannot overflow.
        i64::from(dx.unsigned_abs())
            + i64::from(dy.unsigned_abs())
            + i64::from(dz.unsigned_abs())
            <= i64::from(self.max_taxicab)
    }
}

/// Shift a channel by `delta` steps with wraparound modulo 256.
#[inline]
pub fn wrap_channel(value: u8, delta: i32, step: i32) -> u8 {
    // i64 keeps extreme step/delta products from overflowing.
    (i64::from(value) + i64::from(delta) * i64::from(step)).rem_euclid(256) as u8
}

/// The color reached from `base` by stepping `(dx, dy, dz)` along (r, g, b).
pub fn neighbor_color(base: Color, dx: i32, dy: i32, dz: i32, step: i32) -> Color {
    Color::new(
        wrap_channel(base.r, dx, step),
        wrap_channel(base.g, dy, step),
        wrap_channel(base.b, dz, step),
    )
}

/// Lazy iterator over the neighbors of a color.
///
/// Iterates `dx` outermost, then `dy`, then `dz`, each ascending from
/// `-axis_range`. That order decides which color ends up on top at a shared
/// offset, so it must not change.
#[derive(Debug, Clone)]
pub struct Neighbors {
    base: Color,
    params: NeighborParams,
    // Next triple to examine; None once exhausted.
    cursor: Option<(i32, i32, i32)>,
}

impl Neighbors {
    pub fn new(base: Color, params: NeighborParams) -> Self {
        let r = params.axis_range;
        let cursor = (r >= 0).then_some((-r, -r, -r));
        Self {
            base,
            params,
            cursor,
        }
    }

    fn advance(&mut self) {
        let r = self.params.axis_range;
        self.cursor = match self.cursor {
            Some((dx, dy, dz)) if dz < r => Some((dx, dy, dz + 1)),
            Some((dx, dy, _)) if dy < r => Some((dx, dy + 1, -r)),
            Some((dx, _, _)) if dx < r => Some((dx + 1, -r, -r)),
            _ => None,
        };
    }
}

impl Iterator for Neighbors {
    type Item = Neighbor;

    fn next(&mut self) -> Option<Neighbor> {
        while let Some((dx, dy, dz)) = self.cursor {
            self.advance();
            if self.params.includes(dx, dy, dz) {
                return Some(Neighbor {
                    color: neighbor_color(self.base, dx, dy, dz, self.params.step),
                    offset: Offset::new(dx, dy),
                });
            }
        }
        None
    }
}

/// Generate every neighbor of `base` in iteration order.
pub fn generate_neighbors(base: Color, params: &NeighborParams) -> Vec<Neighbor> {
    Neighbors::new(base, *params).collect()
}

/// Number of neighbors `generate_neighbors` would emit for these parameters.
///
/// Independent of the base color.
pub fn neighbor_count(params: &NeighborParams) -> usize {
    let r = params.axis_range;
    if r < 0 || params.max_taxicab < 0 {
        return 0;
    }
    let mut count = 0;
    for dx in -r..=r {
        for dy in -r..=r {
            // dz values satisfying |dz| <= remaining, clipped to the cube.
            let remaining = i64::from(params.max_taxicab)
                - i64::from(dx.unsigned_abs())
                - i64::from(dy.unsigned_abs());
            if remaining >= 0 {
                count += (2 * remaining.min(i64::from(r)) + 1) as usize;
            }
        }
    }
    count
}
