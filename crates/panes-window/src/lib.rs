// SPDX-License-Identifier: MIT
//
// panes-window — titled windows on a shared terminal screen.
//
// A `WindowManager` owns the screen from panes-term and a set of windows
// keyed by focus priority. Each tick it clears the screen, applies the
// Ctrl bindings (quit, next/previous window, unfocus), routes the key to
// the windows that want it and redraws the visible ones. Windows announce
// draws and updates to listeners registered per event kind.
//
// Around that core: JSON layouts for saving and restoring window sets, a
// TOML config for bindings, dispatch mode and logging, a tracing setup
// that keeps log output off the drawn terminal, and the single-consumer
// event loop that merges keys and resizes.

pub mod config;
pub mod dimension;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod layout;
pub mod logging;
pub mod manager;
pub mod window;

pub use config::Config;
pub use error::{Error, Result};
pub use manager::{Action, WindowManager};
pub use window::Window;
