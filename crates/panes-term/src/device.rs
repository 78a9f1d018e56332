// SPDX-License-Identifier: MIT
//
// The terminal device seam.
//
// Everything above this module talks to "a device": a byte sink that can
// report its size in cells and put itself back the way it found it. The
// real implementation is `terminal::Tty`. `VirtualDevice` keeps the output
// in memory, which is what tests and headless rendering want.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

// ─── Device ─────────────────────────────────────────────────────────────────

/// A terminal output stream the screen can draw to.
pub trait Device: Write {
    /// Current size, queried at call time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Size`](crate::Error::Size) if the size is unknown.
    fn size(&self) -> Result<Size>;

    /// Return the terminal to the mode it was in before we took it over.
    /// Calling this more than once must be harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal could not be restored.
    fn restore(&mut self) -> Result<()>;
}

// ─── VirtualDevice ──────────────────────────────────────────────────────────

/// In-memory device with a fixed, settable size.
///
/// Cloning shares the output buffer and size, so a test can keep one clone
/// to inspect what the screen wrote through the other.
#[derive(Debug, Clone)]
pub struct VirtualDevice {
    output: Arc<Mutex<Vec<u8>>>,
    size: Arc<Mutex<Size>>,
    restores: Arc<Mutex<usize>>,
}

impl VirtualDevice {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            output: Arc::new(Mutex::new(Vec::new())),
            size: Arc::new(Mutex::new(Size::new(cols, rows))),
            restores: Arc::new(Mutex::new(0)),
        }
    }

    /// Simulate a terminal resize.
    pub fn set_size(&self, cols: u16, rows: u16) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = Size::new(cols, rows);
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        let out = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Return everything written so far and clear the buffer.
    pub fn take(&self) -> String {
        let mut out = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let text = String::from_utf8_lossy(&out).into_owned();
        out.clear();
        text
    }

    /// How many times [`Device::restore`] was called.
    #[must_use]
    pub fn restore_count(&self) -> usize {
        *self.restores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for VirtualDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Device for VirtualDevice {
    fn size(&self) -> Result<Size> {
        Ok(*self.size.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn restore(&mut self) -> Result<()> {
        *self.restores.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── VirtualDevice ───────────────────────────────────────────────

    #[test]
    fn clones_share_output() {
        let dev = VirtualDevice::new(80, 24);
        let mut writer = dev.clone();
        writer.write_all(b"abc").unwrap();
        assert_eq!(dev.contents(), "abc");
    }

    #[test]
    fn take_drains() {
        let mut dev = VirtualDevice::new(10, 10);
        dev.write_all(b"xyz").unwrap();
        assert_eq!(dev.take(), "xyz");
        assert_eq!(dev.contents(), "");
    }

    #[test]
    fn set_size_is_visible_through_clones() {
        let dev = VirtualDevice::new(80, 24);
        let other = dev.clone();
        dev.set_size(100, 40);
        assert_eq!(other.size().unwrap(), Size::new(100, 40));
    }

    #[test]
    fn restore_is_counted() {
        let mut dev = VirtualDevice::new(1, 1);
        dev.restore().unwrap();
        dev.restore().unwrap();
        assert_eq!(dev.restore_count(), 2);
    }
}
