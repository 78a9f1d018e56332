// SPDX-License-Identifier: MIT
//
// Layouts — a JSON description of a set of windows.
//
// A layout records what a window looks like on screen and how it takes
// part in focus, but nothing about its runtime state (focus, last key,
// listeners) or its color.
//
// ```json
// {
//   "windows": [
//     {
//       "size": { "x": 50, "y": 100, "unit": "percentage" },
//       "position": { "x": 0, "y": 0, "unit": "pixel" },
//       "name": "Editor",
//       "id": "editor",
//       "focus_updated": true,
//       "focus_priority": 0,
//       "visible": true
//     }
//   ]
// }
// ```

use serde::{Deserialize, Serialize};

use panes_term::color::Color;

use crate::dimension::Dimension;
use crate::error::Result;
use crate::window::Window;

/// Serializable description of one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLayout {
    pub size: Dimension,
    pub position: Dimension,
    pub name: String,
    pub id: String,
    pub focus_updated: bool,
    pub focus_priority: i8,
    pub visible: bool,
}

impl WindowLayout {
    /// Build the described window with body color `color`.
    #[must_use]
    pub fn into_window(self, color: Color) -> Window {
        Window::new(self.id, self.name, self.focus_priority)
            .with_size(self.size)
            .with_position(self.position)
            .with_color(color)
            .with_visible(self.visible)
            .with_focus_updated(self.focus_updated)
    }
}

impl From<&Window> for WindowLayout {
    fn from(window: &Window) -> Self {
        Self {
            size: window.size,
            position: window.position,
            name: window.name.clone(),
            id: window.id().to_owned(),
            focus_updated: window.focus_updated,
            focus_priority: window.focus_priority(),
            visible: window.visible,
        }
    }
}

/// A whole screen's worth of windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub windows: Vec<WindowLayout>,
}

impl Layout {
    /// Parse a layout document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`](crate::Error::Layout) if `json` does not
    /// describe a layout.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`](crate::Error::Layout) if serialization
    /// fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
