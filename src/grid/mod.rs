//! Hex space geometry: neighbor generation, layout and hit testing.

mod hit_index;
mod layout;
mod neighbors;

pub use hit_index::HitIndex;
pub use layout::{
    HexLayout, Point, Spacing, hexagon_vertices, offset_to_pixel, offset_to_pixel_spaced,
    polygon_contains,
};
pub use neighbors::{
    Neighbor, NeighborParams, Neighbors, Offset, generate_neighbors, neighbor_color,
    neighbor_count, wrap_channel,
};
