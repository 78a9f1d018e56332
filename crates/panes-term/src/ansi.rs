// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `Write`. No state and
// no decisions about when to emit; that belongs to the cursor tracker and
// the screen. This module only knows the byte-level encoding of each
// terminal command we use.
//
// Coordinates are passed through exactly as the caller tracks them. The
// terminal treats row/column 0 the same as 1, so a tracker that believes
// the origin is (0, 0) and one that believes it is (1, 1) both land on
// the top-left cell.
//
// Positioning always writes row first: `ESC[{row};{col}f`.

use std::io::{self, Write};

/// SGR 0: reset every attribute and color.
pub const SGR_RESET: &str = "\x1b[0m";

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to the home position (top-left).
#[inline]
pub fn cursor_home(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Move the cursor to column `x`, row `y` (HVP).
#[inline]
pub fn cursor_to(w: &mut (impl Write + ?Sized), x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{y};{x}f")
}

/// Move the cursor to column `x` on the current row (CHA).
#[inline]
pub fn cursor_column(w: &mut (impl Write + ?Sized), x: u16) -> io::Result<()> {
    write!(w, "\x1b[{x}G")
}

/// Move the cursor right by `n` cells (CUF).
#[inline]
pub fn cursor_forward(w: &mut (impl Write + ?Sized), n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}C")
}

/// Move the cursor left by `n` cells (CUB).
#[inline]
pub fn cursor_back(w: &mut (impl Write + ?Sized), n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}D")
}

/// Ask the terminal to remember the cursor position (SCP).
#[inline]
pub fn cursor_save(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[s")
}

/// Jump back to the position remembered by [`cursor_save`] (RCP).
#[inline]
pub fn cursor_restore(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[u")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Erase ───────────────────────────────────────────────────────────────────

/// Clear the entire visible screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Clear the scrollback buffer (ED 3).
#[inline]
pub fn clear_history(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[3J")
}

/// Clear the line the cursor is on (EL 2).
#[inline]
pub fn clear_line(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[2K")
}

/// Clear from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_to_line_end(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[0K")
}

/// Clear from the cursor to the end of the screen (ED 0).
#[inline]
pub fn clear_to_screen_end(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[0J")
}

/// Clear from the start of the line to the cursor (EL 1).
#[inline]
pub fn clear_from_line_start(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[1K")
}

/// Clear from the start of the screen to the cursor (ED 1).
#[inline]
pub fn clear_from_screen_start(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(b"\x1b[1J")
}

// ─── Scroll ──────────────────────────────────────────────────────────────────

/// Scroll the page up by `n` lines (SU). New blank lines appear at the bottom.
#[inline]
pub fn scroll_up(w: &mut (impl Write + ?Sized), n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}S")
}

/// Scroll the page down by `n` lines (SD). New blank lines appear at the top.
#[inline]
pub fn scroll_down(w: &mut (impl Write + ?Sized), n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}T")
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut (impl Write + ?Sized)) -> io::Result<()> {
    w.write_all(SGR_RESET.as_bytes())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
