// SPDX-License-Identifier: MIT
//
// Window manager — owns the screen and the windows, routes keys, cycles
// focus and drives each tick.
//
// Windows are stored in a `BTreeMap` keyed by focus priority, so the focus
// cycle and the per-tick update/draw order are both ascending priority and
// never depend on hashing. Negative priorities are drawn and updated like
// any other window but never enter the focus cycle.
//
// A tick (`update`) is:
//
//   1. home the cursor and clear the visible screen
//   2. act on a bound Ctrl command (quit ends the tick immediately)
//   3. hand the key to every window that is focused or not focus-updated
//   4. draw every visible window
//
// Focus direction is fixed: "next" moves to the neighbor with the next
// LOWER priority (wrapping from the lowest to the highest), "previous" to
// the next higher one (wrapping from the highest to the lowest).
//
// Write failures in the middle of a tick are logged and skipped; the next
// tick repaints everything anyway. Size-query and restore failures abort
// the tick with an error.

use std::collections::BTreeMap;
use std::io;

use panes_term::color::Color;
use panes_term::device::Device;
use panes_term::input::Key;
use panes_term::screen::Screen;

use crate::config::{Command, Config};
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::window::Window;

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep feeding events.
    Continue,
    /// The screen has been closed; stop.
    Quit,
}

/// Focus state as seen by [`WindowManager::focused`].
pub type FocusState<'a> = (Option<&'a Window>, Option<usize>, Vec<i8>);

/// Owns a [`Screen`] and the windows drawn on it.
pub struct WindowManager<D: Device> {
    screen: Screen<D>,
    windows: BTreeMap<i8, Window>,
    config: Config,
}

impl<D: Device> WindowManager<D> {
    #[must_use]
    pub const fn new(screen: Screen<D>, config: Config) -> Self {
        Self {
            screen,
            windows: BTreeMap::new(),
            config,
        }
    }

    #[inline]
    pub const fn screen(&self) -> &Screen<D> {
        &self.screen
    }

    #[inline]
    pub const fn screen_mut(&mut self) -> &mut Screen<D> {
        &mut self.screen
    }

    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    // ── Registration ────────────────────────────────────────────────

    /// Register `window`.
    ///
    /// # Errors
    ///
    /// If the window's focus priority or id (ignoring case) is already
    /// registered, the screen is closed and [`Error::DuplicatePriority`] or
    /// [`Error::DuplicateId`] is returned. Treat either as fatal.
    pub fn add_window(&mut self, mut window: Window) -> Result<()> {
        let priority = window.focus_priority();
        if self.windows.contains_key(&priority) {
            return Err(self.abort(Error::DuplicatePriority { priority }));
        }
        if self.get_window(window.id()).is_some() {
            return Err(self.abort(Error::DuplicateId {
                id: window.id().to_owned(),
            }));
        }

        window.set_dispatch(self.config.dispatch);
        tracing::debug!(id = window.id(), priority, "window registered");
        self.windows.insert(priority, window);
        Ok(())
    }

    /// Tear the screen down ahead of a fatal registration error.
    fn abort(&mut self, err: Error) -> Error {
        tracing::error!(%err, "window registration failed; closing screen");
        if let Err(close_err) = self.screen.close() {
            tracing::warn!(%close_err, "failed to close screen");
        }
        err
    }

    // ── Lookup ──────────────────────────────────────────────────────

    /// The window whose id matches `id`, ignoring case.
    #[must_use]
    pub fn get_window(&self, id: &str) -> Option<&Window> {
        self.windows.values().find(|w| same_id(w.id(), id))
    }

    /// Mutable form of [`get_window`](Self::get_window).
    pub fn get_window_mut(&mut self, id: &str) -> Option<&mut Window> {
        self.windows.values_mut().find(|w| same_id(w.id(), id))
    }

    /// All windows, in ascending focus priority.
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    /// Number of registered windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The focused window, its index in the focus order, and the focus
    /// order itself (non-negative priorities, ascending).
    ///
    /// The first two are `None` when nothing is focused.
    #[must_use]
    pub fn focused(&self) -> FocusState<'_> {
        let order = self.focus_order();
        let index = order
            .iter()
            .position(|p| self.windows.get(p).is_some_and(Window::is_focused));
        let window = index.and_then(|i| self.windows.get(&order[i]));
        (window, index, order)
    }

    fn focus_order(&self) -> Vec<i8> {
        self.windows.range(0..).map(|(&p, _)| p).collect()
    }

    // ── Tick ────────────────────────────────────────────────────────

    /// Run one tick for `key`.
    ///
    /// # Errors
    ///
    /// Fails if the screen size cannot be queried or the terminal cannot
    /// be restored on quit. Individual write failures are only logged.
    pub fn update(&mut self, key: Key) -> Result<Action> {
        if self.screen.should_close() {
            return Ok(Action::Quit);
        }

        warn_on_io(self.screen.clear_visible());

        match self.config.keys.command(key) {
            Some(Command::Quit) => {
                tracing::info!("quit requested");
                self.screen.close()?;
                warn_on_io(self.screen.clear_history());
                warn_on_io(self.screen.flush());
                return Ok(Action::Quit);
            }
            Some(command @ (Command::NextWindow | Command::PreviousWindow)) => {
                self.cycle(command)?;
            }
            Some(Command::Unfocus) => {
                if let Some(window) = self.windows.values_mut().find(|w| w.is_focused()) {
                    window.unfocus();
                }
            }
            None => {}
        }

        for window in self.windows.values_mut() {
            if window.is_focused() || !window.focus_updated {
                window.update(key);
            }
            if window.visible {
                tolerate_io(window.draw(&mut self.screen))?;
            }
        }

        warn_on_io(self.screen.flush());
        Ok(Action::Continue)
    }

    /// Repaint without delivering a real key (after a resize, or the first
    /// frame).
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub fn redraw(&mut self) -> Result<Action> {
        self.update(Key::REDRAW)
    }

    fn cycle(&mut self, command: Command) -> Result<()> {
        let order = self.focus_order();
        let Some(&first) = order.first() else {
            return Ok(());
        };
        let last = order.len() - 1;
        let current = order
            .iter()
            .position(|p| self.windows.get(p).is_some_and(Window::is_focused));

        let target = match current {
            None => first,
            Some(index) => {
                if let Some(window) = self.windows.get_mut(&order[index]) {
                    window.unfocus();
                }
                let neighbor = match command {
                    Command::NextWindow if index == 0 => last,
                    Command::NextWindow => index - 1,
                    _ if index == last => 0,
                    _ => index + 1,
                };
                order[neighbor]
            }
        };

        match self.windows.get_mut(&target) {
            Some(window) => tolerate_io(window.focus(&mut self.screen)),
            None => Ok(()),
        }
    }

    // ── Layouts ─────────────────────────────────────────────────────

    /// Snapshot every window's geometry and flags.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout {
            windows: self.windows.values().map(Into::into).collect(),
        }
    }

    /// Register every window described by a JSON layout, all with body
    /// color `color`. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`] for malformed JSON (nothing is
    /// registered), or a registration error from
    /// [`add_window`](Self::add_window).
    pub fn load_layout(&mut self, json: &str, color: Color) -> Result<usize> {
        let layout = Layout::from_json(json)?;
        let count = layout.windows.len();
        for entry in layout.windows {
            self.add_window(entry.into_window(color))?;
        }
        tracing::info!(count, "layout loaded");
        Ok(count)
    }
}

fn same_id(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

fn warn_on_io(result: io::Result<()>) {
    if let Err(err) = result {
        tracing::warn!(%err, "terminal write failed");
    }
}

/// Downgrade write failures to a warning; pass every other error through.
fn tolerate_io(result: Result<()>) -> Result<()> {
    match result {
        Err(Error::Term(panes_term::Error::Io(err))) => {
            warn_on_io(Err(err));
            Ok(())
        }
        other => other,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
