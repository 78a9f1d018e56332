// SPDX-License-Identifier: MIT
//
// Logging setup.
//
// The rendering terminal is in raw mode and owned by the screen, so log
// lines must go somewhere else: stderr (when redirected), a file, or a
// second terminal opened as a file (`/dev/pts/N`). The default is no
// subscriber at all.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, LogConfig, LogSink};
use crate::error::Result;

/// Build the filter: `RUST_LOG` if set, otherwise `config.level`.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if `config.level` is not a valid
/// filter directive.
pub fn filter(config: &LogConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|err| {
        ConfigError::Invalid(format!("log.level = {:?}: {err}", config.level)).into()
    })
}

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when nothing was installed, either because the sink
/// is `off` or because a subscriber already exists.
///
/// # Errors
///
/// Fails if the filter is invalid or the log file cannot be opened.
pub fn init(config: &LogConfig) -> Result<bool> {
    let filter = filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match config.sink {
        LogSink::Off => return Ok(false),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init().is_ok(),
        LogSink::File => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| ConfigError::Invalid("log.sink = \"file\" needs log.path".into()))?;
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
    };

    if installed {
        tracing::info!(sink = ?config.sink, "logging initialized");
    }
    Ok(installed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
