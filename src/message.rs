//! Application message types for Hex Space.
//!
//! User events reaching the canvas are represented as messages and handled
//! by [`crate::app::HexSpaceApp::handle`].

use crate::color::Color;
use crate::grid::Point;

/// Messages that can be sent to update application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Search box submitted
    Search(String),
    /// Pointer click on the canvas, in canvas pixels
    Click(Point),
    /// Name and comma-separated tags entered for a color
    Annotate {
        color: Color,
        name: String,
        tags: String,
    },
    ZoomIn,
    ZoomOut,
    ToggleFullscreen,
}

/// What a handled message asks the front end to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Nothing visible changed
    None,
    /// The canvas must be redrawn
    Redraw,
    /// Ask the user for a name and tags for this color
    PromptAnnotation(Color),
    /// Annotation committed; show a confirmation
    Annotated {
        color: Color,
        name: String,
        tags: Vec<String>,
    },
    /// Show an error message to the user
    Error(String),
}
