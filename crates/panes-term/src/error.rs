// SPDX-License-Identifier: MIT
//
// Error type for the terminal layer.
//
// Only setup and size queries produce errors that callers are expected to
// act on. Steady-state escape output surfaces as `Error::Io`, which the
// window layer logs and moves past.

use std::io;

use thiserror::Error;

/// Errors produced by the terminal layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A read or write on the terminal stream failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The device could not be put into raw mode because it is not a tty.
    #[error("{path} is not a terminal")]
    NotATerminal {
        /// Device path that was opened.
        path: String,
    },

    /// The window-size query (`TIOCGWINSZ`) failed or reported zero cells.
    #[error("terminal size query failed: {0}")]
    Size(io::Error),

    /// Registering the resize signal handler failed.
    #[error("failed to register resize signal: {0}")]
    Signal(io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
