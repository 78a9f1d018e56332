// SPDX-License-Identifier: MIT
//
// Terminal colors — the eight ANSI base colors and 24-bit RGB.
//
// A color on its own knows only how to "compress" itself into the SGR
// parameter fragment that follows a mode code: `;N` for an indexed color,
// `;2;R;G;B` for RGB. Where that fragment lands (foreground vs background,
// which base offset) is the style's business, see `style.rs`.
//
// Indexed and RGB colors cannot share a single escape sequence in the
// scheme we emit, which is why `Color` is a closed enum and every consumer
// matches on it exhaustively.

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A terminal color: one of the 8 ANSI base colors, or a 24-bit RGB triple.
///
/// ```
/// use panes_term::color::Color;
///
/// assert_eq!(Color::RED.compress(), ";1");
/// assert_eq!(Color::Rgb(94, 224, 183).compress(), ";2;94;224;183");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// ANSI base color index, `0..=7` (black, red, green, yellow, blue,
    /// magenta, cyan, white).
    Indexed(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Indexed(0);
    pub const RED: Self = Self::Indexed(1);
    pub const GREEN: Self = Self::Indexed(2);
    pub const YELLOW: Self = Self::Indexed(3);
    pub const BLUE: Self = Self::Indexed(4);
    pub const MAGENTA: Self = Self::Indexed(5);
    pub const CYAN: Self = Self::Indexed(6);
    pub const WHITE: Self = Self::Indexed(7);

    /// Checked constructor for an indexed color.
    ///
    /// Returns `None` outside the 8 base colors.
    #[inline]
    #[must_use]
    pub const fn indexed(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::Indexed(index))
        } else {
            None
        }
    }

    /// Whether this is a 24-bit color.
    #[inline]
    #[must_use]
    pub const fn is_rgb(self) -> bool {
        matches!(self, Self::Rgb(..))
    }

    /// The SGR parameter fragment for this color.
    ///
    /// Indexed `N` becomes `;N`; RGB becomes `;2;R;G;B`.
    #[must_use]
    pub fn compress(self) -> String {
        match self {
            Self::Indexed(n) => format!(";{n}"),
            Self::Rgb(r, g, b) => format!(";2;{r};{g};{b}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed(n) => write!(f, "ansi({n})"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
