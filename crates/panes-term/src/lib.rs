// SPDX-License-Identifier: MIT
//
// panes-term — the terminal layer under the panes window manager.
//
// Everything needed to put text on a raw-mode terminal and read keys back:
// a closed color palette and SGR style compositor, a cursor tracker that
// remembers where it believes the cursor is, a screen surface with erase
// and scroll primitives, a one-read-one-key input decoder, and a SIGWINCH
// notifier. Output goes through the `Device` trait so the same drawing
// code runs against a real tty or an in-memory buffer.
//
// No TUI framework underneath. Escape sequences are written directly and
// the tty is configured through termios.

pub mod ansi;
pub mod color;
pub mod cursor;
pub mod device;
pub mod error;
pub mod input;
pub mod screen;
pub mod style;

#[cfg(unix)]
pub mod reader;
#[cfg(unix)]
pub mod resize;
#[cfg(unix)]
pub mod terminal;

pub use error::{Error, Result};
