//! Customizable keybindings for Hex Space.
//!
//! Maps the zoom and fullscreen keys to application messages. Bindings are
//! stored in the configuration file.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Plus,
    Minus,
    Equal,
    Escape,
}

/// Action a key triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ZoomIn,
    ZoomOut,
    ToggleFullscreen,
}

impl KeyAction {
    pub fn to_message(self) -> Message {
        match self {
            KeyAction::ZoomIn => Message::ZoomIn,
            KeyAction::ZoomOut => Message::ZoomOut,
            KeyAction::ToggleFullscreen => Message::ToggleFullscreen,
        }
    }
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Hotkey for zooming in
    pub zoom_in: KeyCode,
    /// Hotkey for zooming out
    pub zoom_out: KeyCode,
    /// Hotkey for leaving / entering fullscreen
    pub toggle_fullscreen: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            zoom_in: KeyCode::Plus,
            zoom_out: KeyCode::Minus,
            toggle_fullscreen: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: KeyCode) -> Option<KeyAction> {
        if key == self.zoom_in {
            Some(KeyAction::ZoomIn)
        } else if key == self.zoom_out {
            Some(KeyAction::ZoomOut)
        } else if key == self.toggle_fullscreen {
            Some(KeyAction::ToggleFullscreen)
        } else {
            None
        }
    }

    /// Message for a key press, if the key is bound.
    pub fn message_for_key(&self, key: KeyCode) -> Option<Message> {
        self.action_for_key(key).map(KeyAction::to_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.action_for_key(KeyCode::Plus), Some(KeyAction::ZoomIn));
        assert_eq!(bindings.action_for_key(KeyCode::Minus), Some(KeyAction::ZoomOut));
        assert_eq!(
            bindings.action_for_key(KeyCode::Escape),
            Some(KeyAction::ToggleFullscreen)
        );
        assert_eq!(bindings.action_for_key(KeyCode::Equal), None);
    }

    #[test]
    fn test_rebind() {
        let bindings = KeyBindings {
            zoom_in: KeyCode::Equal,
            ..KeyBindings::default()
        };
        assert_eq!(bindings.message_for_key(KeyCode::Equal), Some(Message::ZoomIn));
        assert_eq!(bindings.message_for_key(KeyCode::Plus), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let bindings = KeyBindings::new();
        let json = serde_json::to_string(&bindings).unwrap();
        assert_eq!(serde_json::from_str::<KeyBindings>(&json).unwrap(), bindings);
    }
}
