// SPDX-License-Identifier: MIT
//
// Error type for window composition.
//
// Registration conflicts are programming errors: the manager tears the
// screen down before returning them, so the caller only has to report and
// exit. Terminal errors pass through unchanged.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by windows, the manager and their configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The terminal layer failed (setup, size query, restore).
    #[error(transparent)]
    Term(#[from] panes_term::Error),

    /// A window was registered with a focus priority already in use.
    #[error("focus priority {priority} is already taken")]
    DuplicatePriority {
        /// The colliding priority.
        priority: i8,
    },

    /// A window was registered with an id already in use (ids compare
    /// case-insensitively).
    #[error("window id {id:?} is already registered")]
    DuplicateId {
        /// The colliding id, as given by the new window.
        id: String,
    },

    /// A layout document could not be read or written.
    #[error("invalid layout: {0}")]
    Layout(#[from] serde_json::Error),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Term(panes_term::Error::Io(err))
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
