// SPDX-License-Identifier: MIT
//
// Screen surface — the drawing stream plus the believed cursor.
//
// The screen owns the device every window draws through and the cursor
// tracker that positions those draws. Erase and scroll primitives are
// thin wrappers over `ansi`; the only state here is the cursor and whether
// the screen has been closed.
//
// Size is never cached: layout math asks the device on every call, so a
// resize is picked up by the next draw without any notification plumbing.

use std::io::{self, Write};

use crate::ansi;
use crate::cursor::{Cursor, CursorHandle};
use crate::device::{Device, Size};
use crate::error::Result;

/// A terminal surface that windows draw on.
///
/// ```
/// use panes_term::device::VirtualDevice;
/// use panes_term::screen::Screen;
///
/// let dev = VirtualDevice::new(80, 24);
/// let mut screen = Screen::new(dev.clone());
/// screen.clear_screen()?;
/// screen.close()?;
/// assert!(screen.should_close());
/// assert_eq!(dev.contents().matches("\x1b[2J").count(), 2);
/// # Ok::<(), panes_term::Error>(())
/// ```
pub struct Screen<D: Device> {
    device: D,
    cursor: Cursor,
    closed: bool,
}

impl<D: Device> Screen<D> {
    /// Wrap a device. The cursor is assumed to start at (0, 0).
    pub const fn new(device: D) -> Self {
        Self {
            device,
            cursor: Cursor::new(),
            closed: false,
        }
    }

    /// The cursor tracker bound to this screen's stream.
    pub fn cursor(&mut self) -> CursorHandle<'_> {
        self.cursor.attach(&mut self.device)
    }

    /// Believed cursor state, without the ability to move it.
    #[inline]
    pub const fn cursor_state(&self) -> &Cursor {
        &self.cursor
    }

    /// The underlying device.
    #[inline]
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Write raw text (already styled, if needed) at the cursor.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.device.write_all(text.as_bytes())
    }

    /// Flush the device.
    ///
    /// # Errors
    ///
    /// Returns the underlying flush error.
    pub fn flush(&mut self) -> io::Result<()> {
        self.device.flush()
    }

    // ── Erase ───────────────────────────────────────────────────────

    /// Clear every visible line.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        ansi::clear_screen(&mut self.device)
    }

    /// Home the cursor and clear every visible line.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn clear_visible(&mut self) -> io::Result<()> {
        self.cursor().home()?;
        ansi::clear_screen(&mut self.device)
    }

    /// Drop the terminal's scrollback history.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn clear_history(&mut self) -> io::Result<()> {
        ansi::clear_history(&mut self.device)
    }

    /// Clear the line the cursor is on.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn clear_line(&mut self) -> io::Result<()> {
        ansi::clear_line(&mut self.device)
    }

    /// Clear from the cursor to the end of the line, or to the end of the
    /// screen when `to_end_of_screen` is set.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn clear_from_cursor(&mut self, to_end_of_screen: bool) -> io::Result<()> {
        if to_end_of_screen {
            ansi::clear_to_screen_end(&mut self.device)
        } else {
            ansi::clear_to_line_end(&mut self.device)
        }
    }

    /// Clear from the start of the line to the cursor, or from the start of
    /// the screen when `from_start_of_screen` is set.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn clear_to_cursor(&mut self, from_start_of_screen: bool) -> io::Result<()> {
        if from_start_of_screen {
            ansi::clear_from_screen_start(&mut self.device)
        } else {
            ansi::clear_from_line_start(&mut self.device)
        }
    }

    /// Reset colors and attributes for whatever is written next.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn reset_style(&mut self) -> io::Result<()> {
        ansi::reset(&mut self.device)
    }

    // ── Scroll ──────────────────────────────────────────────────────

    /// Scroll the page up by `amount` lines.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn scroll_up(&mut self, amount: u16) -> io::Result<()> {
        ansi::scroll_up(&mut self.device, amount)
    }

    /// Scroll the page down by `amount` lines.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn scroll_down(&mut self, amount: u16) -> io::Result<()> {
        ansi::scroll_down(&mut self.device, amount)
    }

    // ── Size / lifecycle ────────────────────────────────────────────

    /// Current `(columns, rows)`, asked of the device on every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Size`](crate::Error::Size) if the query fails.
    pub fn size(&self) -> Result<Size> {
        self.device.size()
    }

    /// Clear the screen, show the cursor and return the terminal to cooked
    /// mode. Once this succeeds, later calls do nothing; after a failed
    /// restore the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal could not be restored.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        if let Err(err) = self.write_teardown() {
            tracing::warn!(%err, "failed to clear screen during close");
        }
        self.device.restore()?;
        self.closed = true;
        tracing::info!("screen closed");
        Ok(())
    }

    fn write_teardown(&mut self) -> io::Result<()> {
        ansi::reset(&mut self.device)?;
        ansi::clear_screen(&mut self.device)?;
        self.cursor().show()?;
        self.device.flush()
    }

    /// Whether [`close`](Self::close) has been called.
    #[inline]
    pub const fn should_close(&self) -> bool {
        self.closed
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::VirtualDevice;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn screen() -> (Screen<VirtualDevice>, VirtualDevice) {
        let dev = VirtualDevice::new(80, 24);
        (Screen::new(dev.clone()), dev)
    }

    // ── Erase ────────────────────────────────────────────────────────

    #[test]
    fn clear_primitives() {
        let (mut s, dev) = screen();
        s.clear_screen().unwrap();
        s.clear_line().unwrap();
        s.clear_history().unwrap();
        assert_eq!(dev.take(), "\x1b[2J\x1b[2K\x1b[3J");
    }

    #[test]
    fn clear_from_cursor_variants() {
        let (mut s, dev) = screen();
        s.clear_from_cursor(false).unwrap();
        s.clear_from_cursor(true).unwrap();
        assert_eq!(dev.take(), "\x1b[0K\x1b[0J");
    }

    #[test]
    fn clear_to_cursor_variants() {
        let (mut s, dev) = screen();
        s.clear_to_cursor(false).unwrap();
        s.clear_to_cursor(true).unwrap();
        assert_eq!(dev.take(), "\x1b[1K\x1b[1J");
    }

    #[test]
    fn clear_visible_homes_cursor() {
        let (mut s, dev) = screen();
        s.cursor().set_position(10, 10).unwrap();
        dev.take();
        s.clear_visible().unwrap();
        assert_eq!(dev.take(), "\x1b[H\x1b[2J");
        assert_eq!(s.cursor_state().position(), (0, 0));
    }

    #[test]
    fn reset_and_scroll() {
        let (mut s, dev) = screen();
        s.reset_style().unwrap();
        s.scroll_up(2).unwrap();
        s.scroll_down(5).unwrap();
        assert_eq!(dev.take(), "\x1b[0m\x1b[2S\x1b[5T");
    }

    // ── Cursor ───────────────────────────────────────────────────────

    #[test]
    fn cursor_writes_through_device() {
        let (mut s, dev) = screen();
        s.cursor().set_position(3, 4).unwrap();
        assert_eq!(dev.take(), "\x1b[4;3f");
        assert_eq!(s.cursor_state().position(), (3, 4));
    }

    #[test]
    fn write_str_is_verbatim() {
        let (mut s, dev) = screen();
        s.write_str("hello").unwrap();
        assert_eq!(dev.take(), "hello");
    }

    // ── Size ─────────────────────────────────────────────────────────

    #[test]
    fn size_is_not_cached() {
        let (s, dev) = screen();
        assert_eq!(s.size().unwrap(), Size::new(80, 24));
        dev.set_size(120, 40);
        assert_eq!(s.size().unwrap(), Size::new(120, 40));
    }

    // ── Close ────────────────────────────────────────────────────────

    #[test]
    fn should_close_false_until_closed() {
        let (mut s, _dev) = screen();
        assert!(!s.should_close());
        s.close().unwrap();
        assert!(s.should_close());
    }

    #[test]
    fn close_is_idempotent() {
        let (mut s, dev) = screen();
        s.close().unwrap();
        s.close().unwrap();
        s.close().unwrap();
        assert!(s.should_close());
        assert_eq!(dev.restore_count(), 1);
        assert_eq!(dev.contents().matches("\x1b[2J").count(), 1);
    }

    #[test]
    fn failed_restore_is_retried() {
        let dev = VirtualDevice::new(80, 24);
        let mut s = Screen::new(StubbornDevice {
            inner: dev.clone(),
            failures: 1,
        });

        assert!(matches!(s.close(), Err(Error::Io(_))));
        assert!(!s.should_close());
        assert_eq!(dev.restore_count(), 0);

        s.close().unwrap();
        assert!(s.should_close());
        assert_eq!(dev.restore_count(), 1);
        s.close().unwrap();
        assert_eq!(dev.restore_count(), 1);
    }

    #[test]
    fn close_shows_hidden_cursor() {
        let (mut s, dev) = screen();
        s.cursor().hide().unwrap();
        dev.take();
        s.close().unwrap();
        assert!(dev.contents().ends_with("\x1b[?25h"));
    }

    /// Fails the first `failures` restores, then delegates.
    struct StubbornDevice {
        inner: VirtualDevice,
        failures: usize,
    }

    impl Write for StubbornDevice {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    impl Device for StubbornDevice {
        fn size(&self) -> Result<Size> {
            self.inner.size()
        }

        fn restore(&mut self) -> Result<()> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::other("tcsetattr failed").into());
            }
            self.inner.restore()
        }
    }
}
