// SPDX-License-Identifier: MIT
//
// End-to-end behavior of a window manager over an in-memory terminal.

use std::sync::mpsc;

use panes_term::color::Color;
use panes_term::device::VirtualDevice;
use panes_term::input::{self, Key};
use panes_term::screen::Screen;
use panes_window::dimension::Dimension;
use panes_window::event::Dispatch;
use panes_window::event_loop::{self, LoopEvent};
use panes_window::{Action, Config, Error, Window, WindowManager};
use pretty_assertions::assert_eq;

fn manager(cols: u16, rows: u16) -> (WindowManager<VirtualDevice>, VirtualDevice) {
    let dev = VirtualDevice::new(cols, rows);
    let config = Config {
        dispatch: Dispatch::Inline,
        ..Config::default()
    };
    (WindowManager::new(Screen::new(dev.clone()), config), dev)
}

// ── Registration ─────────────────────────────────────────────────────

#[test]
fn same_priority_twice_fails() {
    let (mut m, _) = manager(80, 24);
    m.add_window(Window::new("one", "One", 0)).unwrap();
    let err = m.add_window(Window::new("two", "Two", 0)).unwrap_err();
    assert!(matches!(err, Error::DuplicatePriority { priority: 0 }));
    assert!(m.screen().should_close());
}

#[test]
fn negative_priority_is_registered_but_never_listed() {
    let (mut m, _) = manager(80, 24);
    m.add_window(Window::new("main", "Main", 0)).unwrap();
    m.add_window(Window::new("status", "Status", -1)).unwrap();
    assert_eq!(m.len(), 2);

    let (_, _, order) = m.focused();
    assert_eq!(order, vec![0]);
}

// ── Focus cycling ────────────────────────────────────────────────────

#[test]
fn single_window_next_focuses_then_wraps_to_itself() {
    let (mut m, _) = manager(80, 24);
    m.add_window(Window::new("only", "Only", 0)).unwrap();

    m.update(Key::ctrl('N')).unwrap();
    let (window, index, _) = m.focused();
    assert_eq!(window.map(Window::id), Some("only"));
    assert_eq!(index, Some(0));

    m.update(Key::ctrl('N')).unwrap();
    let (window, index, _) = m.focused();
    assert_eq!(window.map(Window::id), Some("only"));
    assert_eq!(index, Some(0));
}

#[test]
fn next_walks_toward_lower_priorities() {
    let (mut m, _) = manager(80, 24);
    for (id, p) in [("low", 0), ("mid", 4), ("high", 9)] {
        m.add_window(Window::new(id, id, p)).unwrap();
    }

    let mut seen = Vec::new();
    for _ in 0..4 {
        m.update(Key::ctrl('N')).unwrap();
        seen.push(m.focused().0.map(|w| w.id().to_owned()).unwrap());
    }
    assert_eq!(seen, vec!["low", "high", "mid", "low"]);
}

#[test]
fn custom_bindings_are_honored() {
    let dev = VirtualDevice::new(80, 24);
    let config = Config::from_toml_str(
        r#"
        dispatch = "inline"
        [keys]
        next_window = "]"
        quit = "X"
        "#,
    )
    .unwrap();
    let mut m = WindowManager::new(Screen::new(dev), config);
    m.add_window(Window::new("a", "A", 0)).unwrap();

    // Ctrl+] arrives as byte 29.
    m.update(input::decode(&[29, 0, 0, 0, 0, 0, 0, 0])).unwrap();
    assert!(m.get_window("a").unwrap().is_focused());

    assert_eq!(m.update(Key::ctrl('Q')).unwrap(), Action::Continue);
    assert_eq!(m.update(Key::ctrl('X')).unwrap(), Action::Quit);
}

// ── Rendering ────────────────────────────────────────────────────────

#[test]
fn frame_contains_titles_and_fill() {
    let (mut m, dev) = manager(20, 11);
    m.add_window(
        Window::new("left", "L", 0)
            .with_size(Dimension::percent(50, 50))
            .with_color(Color::BLUE),
    )
    .unwrap();
    m.add_window(
        Window::new("right", "R", 1)
            .with_size(Dimension::percent(50, 50))
            .with_position(Dimension::percent(50, 0))
            .with_focus_updated(true),
    )
    .unwrap();

    m.update(Key::char('#')).unwrap();
    let frame = dev.take();

    // 20 columns at 50% is 10; "L" centered in 10 leaves 4 left, 5 right.
    assert!(frame.contains("\x1b[1;31m    L     \x1b[0m"));
    assert!(frame.contains("\x1b[0;44m##########\x1b[0m"));
    // The focus-updated window has not seen the key.
    assert!(frame.contains("\x1b[1;10f"));
    assert_eq!(m.get_window("right").unwrap().fill(), None);
}

#[test]
fn resize_changes_geometry_on_next_draw() {
    let (mut m, dev) = manager(20, 11);
    m.add_window(Window::new("w", "W", 0).with_size(Dimension::percent(100, 100)))
        .unwrap();
    m.update(Key::char('.')).unwrap();
    assert!(dev.take().contains(&".".repeat(20)));

    dev.set_size(30, 11);
    m.redraw().unwrap();
    let frame = dev.take();
    assert!(frame.contains(&".".repeat(30)));
}

// ── Layouts ──────────────────────────────────────────────────────────

#[test]
fn layout_survives_a_json_round_trip() {
    let (mut m, _) = manager(80, 24);
    m.add_window(
        Window::new("editor", "Editor", 0)
            .with_size(Dimension::percent(70, 100))
            .with_focus_updated(true),
    )
    .unwrap();
    m.add_window(
        Window::new("status", "Status", -1)
            .with_size(Dimension::cells(80, 1))
            .with_visible(false),
    )
    .unwrap();

    let json = m.layout().to_json().unwrap();

    let (mut restored, _) = manager(80, 24);
    assert_eq!(restored.load_layout(&json, Color::BLACK).unwrap(), 2);
    assert_eq!(restored.layout(), m.layout());
    assert!(!restored.get_window("STATUS").unwrap().visible);
}

#[test]
fn loading_a_conflicting_layout_fails() {
    let (mut m, _) = manager(80, 24);
    m.add_window(Window::new("editor", "Editor", 0)).unwrap();
    let json = m.layout().to_json().unwrap();

    let err = m.load_layout(&json, Color::BLACK).unwrap_err();
    assert!(matches!(err, Error::DuplicatePriority { .. }));
}

#[test]
fn malformed_layout_registers_nothing() {
    let (mut m, _) = manager(80, 24);
    assert!(matches!(m.load_layout("{", Color::BLACK), Err(Error::Layout(_))));
    assert!(m.is_empty());
    assert!(!m.screen().should_close());
}

// ── Event loop ───────────────────────────────────────────────────────

#[test]
fn loop_processes_keys_in_order_until_quit() {
    let (mut m, dev) = manager(40, 12);
    m.add_window(Window::new("a", "A", 0)).unwrap();
    m.add_window(Window::new("b", "B", 1).with_focus_updated(true))
        .unwrap();

    let (tx, rx) = mpsc::channel();
    for event in [
        LoopEvent::Key(Key::char('1')),
        LoopEvent::Key(Key::ctrl('P')), // focus a
        LoopEvent::Key(Key::ctrl('P')), // focus b
        LoopEvent::Key(Key::char('2')),
        LoopEvent::Resize(panes_term::device::Size::new(40, 12)),
        LoopEvent::Key(Key::ctrl('Q')),
    ] {
        tx.send(event).unwrap();
    }

    event_loop::run(&mut m, &rx).unwrap();
    assert_eq!(m.get_window("a").unwrap().fill(), Some('2'));
    assert_eq!(m.get_window("b").unwrap().fill(), Some('2'));
    assert!(m.screen().should_close());
    assert_eq!(dev.restore_count(), 1);
}
