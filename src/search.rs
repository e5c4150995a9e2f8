//! Search box input handling.

use thiserror::Error;

use crate::color::{Color, ColorError};

/// Rejected search input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid hex color code '{input}': {reason}")]
pub struct SearchError {
    /// Input as typed, after trimming
    pub input: String,
    /// Why it was rejected
    pub reason: ColorError,
}

/// Parse search box text into a color.
///
/// Accepts `rrggbb` or `#rrggbb` in any letter case, surrounded by optional
/// whitespace.
pub fn parse_search(text: &str) -> Result<Color, SearchError> {
    let input = text.trim();
    Color::from_hex(input).map_err(|reason| SearchError {
        input: input.to_string(),
        reason,
    })
}

/// Canonical `#rrggbb` form of valid search text.
pub fn normalize_search(text: &str) -> Result<String, SearchError> {
    parse_search(text).map(|c| c.to_hex())
}
