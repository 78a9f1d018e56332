// SPDX-License-Identifier: MIT
//
// Dimensions — a window's size or position, absolute or relative.

use serde::{Deserialize, Serialize};

/// How the two components of a [`Dimension`] are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Terminal cells.
    #[default]
    Pixel,
    /// Percent of the container, truncated to whole cells.
    Percentage,
}

/// An `(x, y)` pair in some [`Unit`].
///
/// ```
/// use panes_window::dimension::{Dimension, Unit};
///
/// let half = Dimension::percent(50, 50);
/// assert_eq!(half.value(100, 40), (50, 20));
/// assert_eq!(Dimension::cells(7, 3).value(100, 40), (7, 3));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub x: u16,
    pub y: u16,
    pub unit: Unit,
}

impl Dimension {
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, unit: Unit) -> Self {
        Self { x, y, unit }
    }

    /// Absolute cell coordinates.
    #[inline]
    #[must_use]
    pub const fn cells(x: u16, y: u16) -> Self {
        Self::new(x, y, Unit::Pixel)
    }

    /// Percentages of the container.
    #[inline]
    #[must_use]
    pub const fn percent(x: u16, y: u16) -> Self {
        Self::new(x, y, Unit::Percentage)
    }

    /// Resolve against a `width × height` container.
    #[must_use]
    pub fn value(self, width: u16, height: u16) -> (u16, u16) {
        match self.unit {
            Unit::Pixel => (self.x, self.y),
            Unit::Percentage => (scale(width, self.x), scale(height, self.y)),
        }
    }
}

/// `container / 100 * percent`, truncated. Saturates at `u16::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(container: u16, percent: u16) -> u16 {
    (f64::from(container) / 100.0 * f64::from(percent)) as u16
}

// ─── Tests ───────────────────────────────────────────────────────────────────
