// SPDX-License-Identifier: MIT
//
// Configuration — key bindings, event dispatch and logging.
//
// Read from TOML at `$XDG_CONFIG_HOME/panes/config.toml` (usually
// `~/.config/panes/config.toml`). Every section and field is optional:
//
// ```toml
// dispatch = "inline"
//
// [keys]
// quit = "Q"
// next_window = "N"
// previous_window = "P"
// unfocus = "H"
//
// [log]
// level = "debug"
// sink = "file"
// path = "/dev/pts/3"
// ```
//
// Bindings name the letter held with Ctrl, so they must lie in `@..=_`,
// the range a single control byte decodes to.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use panes_term::input::Key;

use crate::event::Dispatch;

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parse but make no sense together.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ─── Key bindings ───────────────────────────────────────────────────────────

/// A manager-level command bound to a Ctrl combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    NextWindow,
    PreviousWindow,
    Unfocus,
}

/// Ctrl+letter bindings for the manager's commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub quit: char,
    pub next_window: char,
    pub previous_window: char,
    pub unfocus: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: 'Q',
            next_window: 'N',
            previous_window: 'P',
            unfocus: 'H',
        }
    }
}

impl KeyBindings {
    /// The command `key` triggers, if any. Only control keys can match.
    #[must_use]
    pub fn command(&self, key: Key) -> Option<Command> {
        if !key.control {
            return None;
        }
        match key.rune {
            r if r == self.quit => Some(Command::Quit),
            r if r == self.next_window => Some(Command::NextWindow),
            r if r == self.previous_window => Some(Command::PreviousWindow),
            r if r == self.unfocus => Some(Command::Unfocus),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let bound = [
            ("quit", self.quit),
            ("next_window", self.next_window),
            ("previous_window", self.previous_window),
            ("unfocus", self.unfocus),
        ];

        for (name, rune) in bound {
            if !('@'..='_').contains(&rune) {
                return Err(ConfigError::Invalid(format!(
                    "keys.{name} = {rune:?} cannot be typed as Ctrl+key (expected '@'..='_')"
                )));
            }
            if rune == '[' {
                return Err(ConfigError::Invalid(format!(
                    "keys.{name} = '[' cannot be bound: Ctrl+[ is read as Escape"
                )));
            }
        }
        for (i, (name, rune)) in bound.iter().enumerate() {
            if let Some((other, _)) = bound[i + 1..].iter().find(|(_, r)| r == rune) {
                return Err(ConfigError::Invalid(format!(
                    "keys.{name} and keys.{other} are both bound to {rune:?}"
                )));
            }
        }
        Ok(())
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Where log lines go. Never the terminal being drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSink {
    #[default]
    Off,
    Stderr,
    /// Append to [`LogConfig::path`] (a file or another terminal).
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub sink: LogSink,
    pub path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            sink: LogSink::Off,
            path: None,
        }
    }
}

// ─── Config ─────────────────────────────────────────────────────────────────

/// Everything the window manager and demo binary are configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: KeyBindings,
    pub dispatch: Dispatch,
    pub log: LogConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for bindings that clash or cannot be typed.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// see [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/panes/config.toml`, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("panes").join("config.toml"))
    }

    /// Load from `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.keys.validate()?;
        if self.log.sink == LogSink::File && self.log.path.is_none() {
            return Err(ConfigError::Invalid("log.sink = \"file\" needs log.path".into()));
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
