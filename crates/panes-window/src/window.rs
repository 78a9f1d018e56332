// SPDX-License-Identifier: MIT
//
// Window — a titled rectangle on the screen.
//
// A window knows where it sits (size and position, absolute or relative to
// the screen), whether it is shown, and whether it wants keys only while
// focused. Its focus flag belongs to the manager; callers read it through
// `is_focused()`.
//
// Drawing resolves the geometry against the live screen size with the
// bottom row held back as a margin, then paints:
//
//   row 0      centered name, bold, green when focused and red otherwise
//   rows 1..   the last printable key, repeated across the window width,
//              on the window's background color
//
// Every draw and update is announced to the window's listeners first.

use std::sync::Arc;

use panes_term::color::Color;
use panes_term::device::Device;
use panes_term::input::Key;
use panes_term::screen::Screen;
use panes_term::style::{Mode, Style};

use crate::dimension::Dimension;
use crate::error::Result;
use crate::event::{Dispatch, EventKind, EventParam, Listener, Listeners};

/// A rectangular region managed by a [`WindowManager`](crate::manager::WindowManager).
///
/// ```
/// use panes_term::color::Color;
/// use panes_window::dimension::Dimension;
/// use panes_window::window::Window;
///
/// let editor = Window::new("editor", "Editor", 0)
///     .with_size(Dimension::percent(50, 100))
///     .with_position(Dimension::cells(0, 0))
///     .with_color(Color::BLUE);
/// assert_eq!(editor.focus_priority(), 0);
/// assert!(!editor.is_focused());
/// ```
#[derive(Debug, Clone)]
pub struct Window {
    id: String,
    focus_priority: i8,
    /// Title drawn on the first row.
    pub name: String,
    pub size: Dimension,
    /// Top-left corner.
    pub position: Dimension,
    /// Body background.
    pub color: Color,
    /// Whether the window is drawn each tick.
    pub visible: bool,
    /// When set, the window only receives updates while focused.
    pub focus_updated: bool,
    focused: bool,
    fill: Option<char>,
    listeners: Listeners,
    dispatch: Dispatch,
}

impl Window {
    /// A visible, always-updated window with no area yet.
    ///
    /// A negative `focus_priority` keeps the window out of the focus cycle.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, focus_priority: i8) -> Self {
        Self {
            id: id.into(),
            focus_priority,
            name: name.into(),
            size: Dimension::default(),
            position: Dimension::default(),
            color: Color::BLACK,
            visible: true,
            focus_updated: false,
            focused: false,
            fill: None,
            listeners: Listeners::new(),
            dispatch: Dispatch::default(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: Dimension) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Dimension) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_focus_updated(mut self, focus_updated: bool) -> Self {
        self.focus_updated = focus_updated;
        self
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Unique id (compared case-insensitively by the manager).
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    #[must_use]
    pub const fn focus_priority(&self) -> i8 {
        self.focus_priority
    }

    /// Whether this window can ever take focus.
    #[inline]
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        self.focus_priority >= 0
    }

    #[inline]
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// The last printable key this window received.
    #[inline]
    #[must_use]
    pub const fn fill(&self) -> Option<char> {
        self.fill
    }

    #[inline]
    #[must_use]
    pub const fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Choose how this window's events are delivered.
    pub fn set_dispatch(&mut self, dispatch: Dispatch) {
        self.dispatch = dispatch;
    }

    // ── Focus ───────────────────────────────────────────────────────

    /// Take focus and move the screen's cursor to the window's corner.
    ///
    /// # Errors
    ///
    /// Fails if the screen size cannot be queried or the move cannot be
    /// written. The window is focused either way.
    pub fn focus<D: Device>(&mut self, screen: &mut Screen<D>) -> Result<()> {
        self.focused = true;
        tracing::debug!(id = %self.id, "window focused");

        let size = screen.size()?;
        let (x, y) = self.position.value(size.cols, size.rows);
        screen.cursor().set_position(x, y)?;
        Ok(())
    }

    pub fn unfocus(&mut self) {
        if self.focused {
            tracing::debug!(id = %self.id, "window unfocused");
        }
        self.focused = false;
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Announce `kind` to every listener registered for it.
    ///
    /// Returns how many listeners were scheduled. With
    /// [`Dispatch::Spawn`] they may not have run yet.
    pub fn emit(&self, kind: &EventKind, params: Vec<EventParam>) -> usize {
        tracing::debug!(window = %self.name, %kind, ?params, "event");
        self.listeners.emit(self.dispatch, kind, params)
    }

    /// Register `listener` at `priority` for each of `kinds`, replacing any
    /// listener already at that priority.
    pub fn on_event<F>(&mut self, listener: F, priority: u8, kinds: &[EventKind])
    where
        F: Fn(&EventKind, &[EventParam]) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.listeners.insert(&listener, priority, kinds);
    }

    /// Deregister the listener at `priority` for `kind`. Returns whether one
    /// was registered.
    pub fn remove_event(&mut self, kind: &EventKind, priority: u8) -> bool {
        self.listeners.remove(kind, priority)
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: &EventKind) -> usize {
        self.listeners.count(kind)
    }

    // ── Tick ────────────────────────────────────────────────────────

    /// Handle a key: announce it, and remember it as the body fill unless
    /// it is a control combination.
    pub fn update(&mut self, key: Key) {
        self.emit(
            &EventKind::Update,
            vec![EventParam::Key(key.rune), EventParam::Control(key.control)],
        );
        if !key.control {
            self.fill = Some(key.rune);
        }
    }

    /// Paint the window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Term`](crate::Error::Term) wrapping a size error if
    /// the screen cannot be measured, or an I/O error if a write fails.
    pub fn draw<D: Device>(&self, screen: &mut Screen<D>) -> Result<()> {
        self.emit(&EventKind::Draw, Vec::new());

        let size = screen.size()?;
        let rows = size.rows.saturating_sub(1);
        let (width, height) = self.size.value(size.cols, rows);
        let (x, mut y) = self.position.value(size.cols, rows);
        if y == 0 {
            y = 1;
        }

        let title = self.title_style().colorize(&center_text(&self.name, usize::from(width)));
        let body = self.body_style().colorize(&self.body_row(width));

        screen.cursor().save()?;
        for row in 0..height {
            screen.cursor().set_position(x, y.saturating_add(row))?;
            if row == 0 {
                screen.reset_style()?;
                screen.write_str(&title)?;
            } else {
                screen.write_str(&body)?;
            }
        }
        screen.cursor().restore()?;
        Ok(())
    }

    fn title_style(&self) -> Style {
        let color = if self.focused { Color::GREEN } else { Color::RED };
        Style::new(Mode::Bold).with_foreground(color)
    }

    fn body_style(&self) -> Style {
        Style::new(Mode::Normal).with_background(self.color)
    }

    fn body_row(&self, width: u16) -> String {
        self.fill
            .map(|c| std::iter::repeat_n(c, usize::from(width)).collect())
            .unwrap_or_default()
    }
}

/// Pad `text` with spaces on both sides to fill `width` columns.
///
/// An odd remainder puts the extra space on the right. Text at least as
/// wide as the field comes back unchanged, never truncated.
///
/// ```
/// use panes_window::window::center_text;
///
/// assert_eq!(center_text("Hi", 6), "  Hi  ");
/// assert_eq!(center_text("Hi", 5), " Hi  ");
/// assert_eq!(center_text("Hello", 3), "Hello");
/// ```
#[must_use]
pub fn center_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if width <= len {
        return text.to_owned();
    }
    let spare = width - len;
    let left = spare / 2;
    let right = spare - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
