// SPDX-License-Identifier: MIT
//
// panes — three windows on the controlling terminal.
//
// This binary wires the two crates together:
//
//   panes-term   → raw tty, key reader thread, SIGWINCH watcher
//   panes-window → windows, focus cycling, config, logging, event loop
//
// Keys and resizes are produced on background threads and merged into one
// channel; the event loop on the main thread is the only consumer:
//
//   /dev/tty ──► KeyReader ─────┐
//                               ├──► mpsc ──► event_loop::run ──► Screen
//   SIGWINCH ──► ResizeWatcher ─┘
//
// Layout:
//
//   ┌───────────────────┬──────────┐
//   │ Editor (0)        │ Files (1)│
//   │                   │          │
//   ├───────────────────┴──────────┤
//   │ Log (-1, never focused)      │
//   └──────────────────────────────┘
//
// Ctrl+N / Ctrl+P cycle focus, Ctrl+H unfocuses, Ctrl+Q quits (all
// rebindable in the config file).

use std::process;

#[cfg(unix)]
fn main() {
    if let Err(e) = demo::run() {
        eprintln!("panes: {e}");
        process::exit(1);
    }
}

#[cfg(not(unix))]
fn main() {
    eprintln!("panes: a unix terminal is required");
    process::exit(1);
}

#[cfg(unix)]
mod demo {
    use std::sync::mpsc;

    use panes_term::color::Color;
    use panes_term::reader::KeyReader;
    use panes_term::resize::ResizeWatcher;
    use panes_term::screen::Screen;
    use panes_term::terminal::Tty;
    use panes_window::dimension::Dimension;
    use panes_window::event::{EventKind, EventParam};
    use panes_window::event_loop::{self, LoopEvent};
    use panes_window::{logging, Config, Result, Window, WindowManager};

    pub fn run() -> Result<()> {
        let config = Config::load_or_default(Config::default_path().as_deref())?;
        logging::init(&config.log)?;

        let tty = Tty::open()?;
        let fd = tty.reader_fd();
        let mut manager = WindowManager::new(Screen::new(tty), config);
        for window in windows() {
            manager.add_window(window)?;
        }

        let (tx, rx) = mpsc::channel();
        let mut reader = KeyReader::spawn(fd, tx.clone(), LoopEvent::Key);
        let mut watcher = ResizeWatcher::spawn(fd, tx, LoopEvent::Resize)?;

        let result = event_loop::run(&mut manager, &rx);

        reader.stop();
        watcher.stop();
        manager.screen_mut().close()?;
        result
    }

    fn windows() -> Vec<Window> {
        let mut editor = Window::new("editor", "Editor", 0)
            .with_size(Dimension::percent(70, 80))
            .with_color(Color::BLUE)
            .with_focus_updated(true);
        editor.on_event(
            |kind: &EventKind, params: &[EventParam]| tracing::trace!(%kind, ?params, "editor event"),
            0,
            &[EventKind::Update],
        );

        let files = Window::new("files", "Files", 1)
            .with_size(Dimension::percent(30, 80))
            .with_position(Dimension::percent(70, 0))
            .with_color(Color::MAGENTA)
            .with_focus_updated(true);

        let log = Window::new("log", "Log", -1)
            .with_size(Dimension::percent(100, 20))
            .with_position(Dimension::percent(0, 80))
            .with_color(Color::BLACK);

        vec![editor, files, log]
    }
}
