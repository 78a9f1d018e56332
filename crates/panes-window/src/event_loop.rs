// SPDX-License-Identifier: MIT
//
// Event loop — one consumer, one event at a time.
//
// Keys and resizes are produced on background threads (the key reader and
// the resize watcher) and land in a single channel. This loop is the only
// code that touches the window manager, so windows and focus state never
// need a lock:
//
//   producer threads ──► mpsc ──► run() ──► WindowManager::{update, redraw}
//
// The loop paints once up front, then blocks on the channel. It ends when
// the manager reports `Action::Quit`, when the screen has been closed by
// someone else, or when every sender is gone.

use std::sync::mpsc::Receiver;

use panes_term::device::{Device, Size};
use panes_term::input::Key;

use crate::error::Result;
use crate::manager::{Action, WindowManager};

/// Something the loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// A decoded key press.
    Key(Key),
    /// The terminal changed size.
    Resize(Size),
}

/// Drive `manager` from `events` until quit.
///
/// Undecodable keys ([`Key::NONE`]) are dropped without a tick.
///
/// # Errors
///
/// Returns the first error the manager cannot recover from (a failed size
/// query or terminal restore).
pub fn run<D: Device>(manager: &mut WindowManager<D>, events: &Receiver<LoopEvent>) -> Result<()> {
    tracing::info!(windows = manager.len(), "event loop started");

    let mut action = manager.redraw()?;
    while action == Action::Continue {
        let Ok(event) = events.recv() else {
            tracing::debug!("event sources closed");
            break;
        };

        action = match event {
            LoopEvent::Key(key) if key.is_none() => continue,
            LoopEvent::Key(key) => manager.update(key)?,
            LoopEvent::Resize(size) => {
                tracing::debug!(cols = size.cols, rows = size.rows, "redraw after resize");
                manager.redraw()?
            }
        };

        if manager.screen().should_close() {
            action = Action::Quit;
        }
    }

    tracing::info!("event loop stopped");
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::Dispatch;
    use crate::window::Window;
    use panes_term::device::VirtualDevice;
    use panes_term::screen::Screen;
    use std::sync::mpsc;

    fn manager() -> (WindowManager<VirtualDevice>, VirtualDevice) {
        let dev = VirtualDevice::new(40, 12);
        let config = Config {
            dispatch: Dispatch::Inline,
            ..Config::default()
        };
        let mut m = WindowManager::new(Screen::new(dev.clone()), config);
        m.add_window(Window::new("a", "A", 0)).unwrap();
        m.add_window(Window::new("b", "B", 1)).unwrap();
        (m, dev)
    }

    #[test]
    fn stops_on_quit() {
        let (mut m, dev) = manager();
        let (tx, rx) = mpsc::channel();
        tx.send(LoopEvent::Key(Key::char('x'))).unwrap();
        tx.send(LoopEvent::Key(Key::ctrl('Q'))).unwrap();
        tx.send(LoopEvent::Key(Key::char('y'))).unwrap();

        run(&mut m, &rx).unwrap();
        assert!(m.screen().should_close());
        assert_eq!(m.get_window("a").unwrap().fill(), Some('x'));
        assert_eq!(dev.restore_count(), 1);
        // The key after quit is still queued.
        assert_eq!(rx.try_recv().unwrap(), LoopEvent::Key(Key::char('y')));
    }

    #[test]
    fn stops_when_senders_drop() {
        let (mut m, _dev) = manager();
        let (tx, rx) = mpsc::channel();
        tx.send(LoopEvent::Key(Key::ctrl('N'))).unwrap();
        drop(tx);

        run(&mut m, &rx).unwrap();
        assert!(!m.screen().should_close());
        assert_eq!(m.focused().0.map(Window::id), Some("a"));
    }

    #[test]
    fn sentinel_keys_are_skipped() {
        let (mut m, dev) = manager();
        run_until_drained(&mut m, &[]);
        let first_frame = dev.take();

        run_until_drained(&mut m, &[LoopEvent::Key(Key::NONE)]);
        // Only the initial frame of the second run, no extra tick.
        assert_eq!(dev.take(), first_frame);
    }

    #[test]
    fn resize_forces_redraw_without_changing_fill() {
        let (mut m, dev) = manager();
        let (tx, rx) = mpsc::channel();
        tx.send(LoopEvent::Key(Key::char('k'))).unwrap();
        tx.send(LoopEvent::Resize(Size::new(80, 24))).unwrap();
        drop(tx);

        dev.set_size(80, 24);
        run(&mut m, &rx).unwrap();
        assert_eq!(m.get_window("b").unwrap().fill(), Some('k'));
    }

    #[test]
    fn already_closed_screen_returns_immediately() {
        let (mut m, dev) = manager();
        m.screen_mut().close().unwrap();
        let before = dev.contents();
        let (_tx, rx) = mpsc::channel();

        run(&mut m, &rx).unwrap();
        assert_eq!(dev.contents(), before);
    }

    /// Run with a closed channel holding `events`, so the loop ends once
    /// they are consumed.
    fn run_until_drained(m: &mut WindowManager<VirtualDevice>, events: &[LoopEvent]) {
        let (tx, rx) = mpsc::channel();
        for &event in events {
            tx.send(event).unwrap();
        }
        drop(tx);
        run(m, &rx).unwrap();
    }
}
