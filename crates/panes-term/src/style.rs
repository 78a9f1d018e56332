// SPDX-License-Identifier: MIT
//
// Styles — a text mode plus optional foreground/background colors, rendered
// as a single SGR escape sequence.
//
// Two color regimes exist and never mix inside one sequence:
//
//   Indexed  → ESC[<mode>;<30+fg>;<40+bg>m     (either channel optional)
//   RGB fg   → ESC[38;2;R;G;Bm
//   RGB bg   → ESC[48;2;R;G;Bm
//
// Setting an RGB color on one channel clears the other channel. Setting an
// indexed color returns the style to the indexed regime and drops the other
// channel if that channel was the one driving RGB output. The result is that
// a style never carries a color that its escape sequence would silently
// ignore.
//
// The text mode (Normal, Bold, ...) and the color regime are tracked
// separately. Going back to the indexed regime leaves the text mode alone,
// so a Bold style stays Bold across color changes.

use std::fmt;

use crate::ansi::SGR_RESET;
use crate::color::Color;

// ─── Mode ────────────────────────────────────────────────────────────────────

/// Text rendering mode (the leading SGR parameter in indexed output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    Bold,
    Dim,
    Underline,
    Blink,
}

impl Mode {
    /// The SGR code for this mode.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Bold => 1,
            Self::Dim => 2,
            Self::Underline => 4,
            Self::Blink => 5,
        }
    }
}

/// Which color regime the style renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Base-palette colors on either or both channels.
    #[default]
    Indexed,
    /// A 24-bit foreground and nothing else.
    RgbForeground,
    /// A 24-bit background and nothing else.
    RgbBackground,
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// A text mode and up to two colors.
///
/// ```
/// use panes_term::color::Color;
/// use panes_term::style::{Mode, Style};
///
/// let mut style = Style::new(Mode::Bold);
/// style.set_foreground(Color::GREEN);
/// assert_eq!(style.colorize("hi"), "\x1b[1;32mhi\x1b[0m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    mode: Mode,
    color_mode: ColorMode,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl Style {
    /// A style with the given text mode and no colors.
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            color_mode: ColorMode::Indexed,
            foreground: None,
            background: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    #[inline]
    #[must_use]
    pub const fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    #[inline]
    #[must_use]
    pub const fn background(&self) -> Option<Color> {
        self.background
    }

    /// Set the foreground color.
    pub fn set_foreground(&mut self, color: Color) {
        match color {
            Color::Indexed(_) => {
                if self.color_mode == ColorMode::RgbBackground {
                    self.background = None;
                }
                self.color_mode = ColorMode::Indexed;
            }
            Color::Rgb(..) => {
                self.color_mode = ColorMode::RgbForeground;
                self.background = None;
            }
        }
        self.foreground = Some(color);
    }

    /// Set the background color.
    pub fn set_background(&mut self, color: Color) {
        match color {
            Color::Indexed(_) => {
                if self.color_mode == ColorMode::RgbForeground {
                    self.foreground = None;
                }
                self.color_mode = ColorMode::Indexed;
            }
            Color::Rgb(..) => {
                self.color_mode = ColorMode::RgbBackground;
                self.foreground = None;
            }
        }
        self.background = Some(color);
    }

    /// Builder form of [`set_foreground`](Self::set_foreground).
    #[must_use]
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.set_foreground(color);
        self
    }

    /// Builder form of [`set_background`](Self::set_background).
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.set_background(color);
        self
    }

    /// Wrap `text` in this style's opening sequence and an SGR reset.
    #[must_use]
    pub fn colorize(&self, text: &str) -> String {
        format!("{self}{text}{SGR_RESET}")
    }

    /// The SGR parameter list (everything between `ESC[` and `m`).
    fn params(&self) -> String {
        match self.color_mode {
            ColorMode::RgbForeground => {
                format!("38{}", self.foreground.map(Color::compress).unwrap_or_default())
            }
            ColorMode::RgbBackground => {
                format!("48{}", self.background.map(Color::compress).unwrap_or_default())
            }
            ColorMode::Indexed => {
                let mut out = self.mode.code().to_string();
                if let Some(fg) = self.foreground {
                    out.push_str(&shifted(fg, 30));
                }
                if let Some(bg) = self.background {
                    out.push_str(&shifted(bg, 40));
                }
                out
            }
        }
    }
}

/// Compress an indexed color after shifting it into the fg (30) or bg (40)
/// range. Out-of-range indices wrap into the base palette.
fn shifted(color: Color, base: u8) -> String {
    match color {
        Color::Indexed(n) => Color::Indexed(base + (n & 0x07)).compress(),
        // Unreachable in the indexed regime; setters keep RGB out of it.
        Color::Rgb(..) => String::new(),
    }
}

/// The opening escape sequence, without text or reset.
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{}m", self.params())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
