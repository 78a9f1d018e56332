// SPDX-License-Identifier: MIT
//
// Cursor tracker — where we believe the terminal cursor is.
//
// The tracker never asks the terminal. It records what it last told the
// terminal and emits positioning escapes through a borrowed writer. Two
// consequences callers must live with:
//
//   - `save()`/`restore()` are delegated to the terminal. The tracker keeps
//     no copy of the saved position, so after `restore()` the believed
//     coordinates may no longer match reality.
//   - Relative moves do not clamp. Moving left past column 0 wraps the
//     tracked u16 instead of panicking; keeping coordinates on screen is
//     the caller's job.
//
// The state (`Cursor`) and the writer live in different places (the screen
// owns both), so operations go through `CursorHandle`, a short-lived pair
// of the two.

use std::io::{self, Write};

use crate::ansi;

/// Believed cursor state: position and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    x: u16,
    y: u16,
    hidden: bool,
}

impl Cursor {
    /// A visible cursor at (0, 0).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            hidden: false,
        }
    }

    /// The believed `(x, y)` position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Pair this state with a writer so it can emit escapes.
    pub fn attach<'a>(&'a mut self, out: &'a mut dyn Write) -> CursorHandle<'a> {
        CursorHandle { cursor: self, out }
    }
}

/// A cursor bound to the stream it moves.
pub struct CursorHandle<'a> {
    cursor: &'a mut Cursor,
    out: &'a mut dyn Write,
}

impl CursorHandle<'_> {
    /// The believed `(x, y)` position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        self.cursor.position()
    }

    /// Move to the top-left corner; the tracked position becomes (0, 0).
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn home(&mut self) -> io::Result<()> {
        self.cursor.x = 0;
        self.cursor.y = 0;
        ansi::cursor_home(&mut *self.out)
    }

    /// Move to column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error. The tracked position is updated
    /// regardless, matching what was requested.
    pub fn set_position(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.cursor.x = x;
        self.cursor.y = y;
        ansi::cursor_to(&mut *self.out, x, y)
    }

    /// Move to column `x` on the current row.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn line_position(&mut self, x: u16) -> io::Result<()> {
        self.cursor.x = x;
        ansi::cursor_column(&mut *self.out, x)
    }

    /// Move up `amount` rows, optionally to the start of the resulting line.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn up(&mut self, amount: u16, to_line_start: bool) -> io::Result<()> {
        let x = if to_line_start { 0 } else { self.cursor.x };
        self.set_position(x, self.cursor.y.wrapping_sub(amount))
    }

    /// Move down `amount` rows, optionally to the start of the resulting line.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn down(&mut self, amount: u16, to_line_start: bool) -> io::Result<()> {
        let x = if to_line_start { 0 } else { self.cursor.x };
        self.set_position(x, self.cursor.y.wrapping_add(amount))
    }

    /// Move left `amount` columns on the current row.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn left(&mut self, amount: u16) -> io::Result<()> {
        self.cursor.x = self.cursor.x.wrapping_sub(amount);
        ansi::cursor_back(&mut *self.out, amount)
    }

    /// Move right `amount` columns on the current row.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn right(&mut self, amount: u16) -> io::Result<()> {
        self.cursor.x = self.cursor.x.wrapping_add(amount);
        ansi::cursor_forward(&mut *self.out, amount)
    }

    /// Ask the terminal to remember the current position.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn save(&mut self) -> io::Result<()> {
        ansi::cursor_save(&mut *self.out)
    }

    /// Jump back to the terminal-saved position. Tracked coordinates are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn restore(&mut self) -> io::Result<()> {
        ansi::cursor_restore(&mut *self.out)
    }

    /// Hide the cursor. No output if it is already hidden.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn hide(&mut self) -> io::Result<()> {
        if self.cursor.hidden {
            return Ok(());
        }
        self.cursor.hidden = true;
        ansi::cursor_hide(&mut *self.out)
    }

    /// Show the cursor. No output if it is already visible.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn show(&mut self) -> io::Result<()> {
        if !self.cursor.hidden {
            return Ok(());
        }
        self.cursor.hidden = false;
        ansi::cursor_show(&mut *self.out)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(cursor: &mut Cursor, f: impl FnOnce(&mut CursorHandle<'_>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        {
            let mut handle = cursor.attach(&mut buf);
            f(&mut handle).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    // ── Absolute positioning ──────────────────────────────────────

    #[test]
    fn new_cursor_is_visible_at_origin() {
        let c = Cursor::new();
        assert_eq!(c.position(), (0, 0));
        assert!(!c.is_hidden());
    }

    #[test]
    fn set_position_updates_and_emits() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| h.set_position(7, 3));
        assert_eq!(out, "\x1b[3;7f");
        assert_eq!(c.position(), (7, 3));
    }

    #[test]
    fn home_resets_position() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| {
            h.set_position(4, 4)?;
            h.home()
        });
        assert!(out.ends_with("\x1b[H"));
        assert_eq!(c.position(), (0, 0));
    }

    #[test]
    fn line_position_keeps_row() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| {
            h.set_position(1, 9)?;
            h.line_position(20)
        });
        assert!(out.ends_with("\x1b[20G"));
        assert_eq!(c.position(), (20, 9));
    }

    // ── Vertical moves ────────────────────────────────────────────

    #[test]
    fn down_moves_by_amount_once() {
        let mut c = Cursor::new();
        run(&mut c, |h| {
            h.set_position(5, 2)?;
            h.down(3, false)
        });
        assert_eq!(c.position(), (5, 5));
    }

    #[test]
    fn up_to_line_start() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| {
            h.set_position(5, 10)?;
            h.up(4, true)
        });
        assert!(out.ends_with("\x1b[6;0f"));
        assert_eq!(c.position(), (0, 6));
    }

    #[test]
    fn up_past_top_wraps_instead_of_panicking() {
        let mut c = Cursor::new();
        run(&mut c, |h| h.up(1, false));
        assert_eq!(c.position(), (0, u16::MAX));
    }

    // ── Horizontal moves ──────────────────────────────────────────

    #[test]
    fn right_and_left_touch_only_x() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| {
            h.set_position(2, 8)?;
            h.right(5)?;
            h.left(3)
        });
        assert!(out.ends_with("\x1b[5C\x1b[3D"));
        assert_eq!(c.position(), (4, 8));
    }

    #[test]
    fn left_past_column_zero_wraps() {
        let mut c = Cursor::new();
        run(&mut c, |h| h.left(2));
        assert_eq!(c.position().0, u16::MAX - 1);
    }

    // ── Save / restore ────────────────────────────────────────────

    #[test]
    fn restore_does_not_touch_tracked_position() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| {
            h.set_position(1, 1)?;
            h.save()?;
            h.set_position(30, 12)?;
            h.restore()
        });
        assert!(out.contains("\x1b[s"));
        assert!(out.ends_with("\x1b[u"));
        assert_eq!(c.position(), (30, 12));
    }

    // ── Visibility ────────────────────────────────────────────────

    #[test]
    fn hide_is_emitted_once() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| {
            h.hide()?;
            h.hide()
        });
        assert_eq!(out, "\x1b[?25l");
        assert!(c.is_hidden());
    }

    #[test]
    fn show_when_visible_is_silent() {
        let mut c = Cursor::new();
        assert_eq!(run(&mut c, |h| h.show()), "");
    }

    #[test]
    fn hide_then_show() {
        let mut c = Cursor::new();
        let out = run(&mut c, |h| {
            h.hide()?;
            h.show()
        });
        assert_eq!(out, "\x1b[?25l\x1b[?25h");
        assert!(!c.is_hidden());
    }
}
