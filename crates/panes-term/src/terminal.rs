// SPDX-License-Identifier: MIT
//
// Terminal device binding — raw mode on the controlling tty.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr, cfset*speed), ioctl (TIOCGWINSZ) and isatty. These are the
// standard POSIX interfaces for terminal control. Each unsafe block is
// minimal.
#![allow(unsafe_code)]
//
// `Tty` opens `/dev/tty` for reading and writing, switches it to raw mode
// at a fixed line speed and hands the same descriptor out for both the
// drawing stream (`Write`) and the key reader (`reader_fd`). Restoring is
// idempotent and also happens on drop.
//
// A panic in raw mode would leave the user's shell without echo or line
// editing. A process-wide hook restores the saved termios and shows the
// cursor before the original panic handler prints, so the message lands on
// a working terminal.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::sync::{Mutex, Once};

use crate::device::{Device, Size};
use crate::error::{Error, Result};

/// Device opened by [`Tty::open`].
pub const DEFAULT_TTY: &str = "/dev/tty";

/// Line speed set on the tty when entering raw mode.
const BAUD: libc::speed_t = libc::B19200;

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the size of the terminal behind `fd` via `ioctl(TIOCGWINSZ)`.
///
/// # Errors
///
/// Returns [`Error::Size`] if the ioctl fails or reports a zero dimension.
pub fn get_size(fd: RawFd) -> Result<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &raw mut ws) };

    if result != 0 {
        return Err(Error::Size(io::Error::last_os_error()));
    }
    if ws.ws_col == 0 || ws.ws_row == 0 {
        return Err(Error::Size(io::Error::other("terminal reported a 0-cell dimension")));
    }
    Ok(Size::new(ws.ws_col, ws.ws_row))
}

/// Check whether `fd` refers to a terminal.
#[must_use]
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Saved termios for the panic hook, which cannot reach the `Tty` itself.
static TERMIOS_BACKUP: Mutex<Option<(RawFd, libc::termios)>> = Mutex::new(None);

/// Reset SGR attributes and show the cursor.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h";

static PANIC_HOOK_INSTALLED: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Best-effort restore from the global backup. Ignores every error.
fn emergency_restore() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some((fd, ref original)) = *guard {
            unsafe {
                let _ = libc::write(
                    fd,
                    EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
                    EMERGENCY_RESTORE.len(),
                );
                let _ = libc::tcsetattr(fd, libc::TCSANOW, original);
            }
        }
    }
}

// ─── Tty ────────────────────────────────────────────────────────────────────

/// The controlling terminal in raw mode.
///
/// ```no_run
/// use panes_term::device::Device;
/// use panes_term::terminal::Tty;
///
/// let mut tty = Tty::open()?;
/// println!("{:?}", tty.size()?);
/// tty.restore()?;
/// # Ok::<(), panes_term::Error>(())
/// ```
pub struct Tty {
    file: File,
    /// Termios captured before raw mode. `None` once restored.
    original: Option<libc::termios>,
}

impl Tty {
    /// Open [`DEFAULT_TTY`] in raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be opened, is not a terminal,
    /// or rejects the raw-mode settings.
    pub fn open() -> Result<Self> {
        Self::open_path(DEFAULT_TTY)
    }

    /// Open a specific terminal device in raw mode.
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn open_path(path: &str) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        if !is_tty(file.as_raw_fd()) {
            return Err(Error::NotATerminal { path: path.to_owned() });
        }

        install_panic_hook();

        let mut tty = Self { file, original: None };
        tty.enable_raw_mode()?;
        tracing::debug!(path, "terminal entered raw mode");
        Ok(tty)
    }

    /// Descriptor for the background key reader.
    #[inline]
    #[must_use]
    pub fn reader_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    /// Whether raw mode is still in effect.
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.original.is_some()
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let fd = self.file.as_raw_fd();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }

            self.original = Some(termios);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some((fd, termios));
            }

            // cfmakeraw equivalent: disable all line processing.
            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;

            // VMIN=1, VTIME=0: read() blocks until at least 1 byte available.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::cfsetispeed(&raw mut termios, BAUD) != 0
                || libc::cfsetospeed(&raw mut termios, BAUD) != 0
            {
                return Err(io::Error::last_os_error().into());
            }

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }
        }

        Ok(())
    }
}

impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Device for Tty {
    fn size(&self) -> Result<Size> {
        get_size(self.file.as_raw_fd())
    }

    /// Raw mode stays recorded until `tcsetattr` succeeds, so a failed
    /// restore is retried by the next call or by drop.
    fn restore(&mut self) -> Result<()> {
        let Some(original) = self.original else {
            return Ok(());
        };
        let fd = self.file.as_raw_fd();

        unsafe {
            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const original) != 0 {
                return Err(io::Error::last_os_error().into());
            }
        }

        self.original = None;
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }
        tracing::debug!("terminal restored to cooked mode");
        Ok(())
    }
}

impl Drop for Tty {
    fn drop(&mut self) {
        if self.is_raw() {
            let _ = self.restore();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
