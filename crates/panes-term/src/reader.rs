// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Background key reader — one terminal read becomes one decoded key.
//
// A dedicated thread reads the tty in blocking mode into a small fixed
// buffer, decodes each read with `input::decode`, and sends the result
// through a channel the caller owns. The caller picks the message type
// (`wrap`), so keys can share one queue with other event sources such as
// resize notifications.
//
// Shutdown: the thread polls the descriptor with a short timeout and
// checks an `AtomicBool` stop flag between polls, so it never sits in a
// blocking `read()` after `stop()`.

use std::io;
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::input::{self, Key};

/// Bytes per read. A key press is at most a short escape sequence.
pub const KEY_BUF_SIZE: usize = 8;

/// How often the reader thread checks the stop flag (milliseconds).
const POLL_TIMEOUT_MS: i32 = 50;

/// Background key reader thread.
///
/// # Example
///
/// ```no_run
/// use std::sync::mpsc;
/// use panes_term::reader::KeyReader;
/// use panes_term::terminal::Tty;
///
/// let tty = Tty::open()?;
/// let (tx, rx) = mpsc::channel();
/// let _reader = KeyReader::spawn(tty.reader_fd(), tx, |key| key);
/// while let Ok(key) = rx.recv() {
///     println!("{key:?}");
/// }
/// # Ok::<(), panes_term::Error>(())
/// ```
pub struct KeyReader {
    /// The reader thread handle. `None` after `stop()` joins it.
    handle: Option<JoinHandle<()>>,
    /// Shared flag to signal the thread to exit.
    stop: Arc<AtomicBool>,
}

impl KeyReader {
    /// Spawn the reader on `fd`, sending `wrap(key)` for every read.
    ///
    /// The thread exits when stopped, on EOF or read error, or when the
    /// receiving side of `tx` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a new thread (extremely rare).
    #[must_use]
    pub fn spawn<T, F>(fd: RawFd, tx: Sender<T>, wrap: F) -> Self
    where
        T: Send + 'static,
        F: Fn(Key) -> T + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("key-reader".into())
            .spawn(move || {
                Self::reader_loop(fd, &tx, &wrap, &stop_flag);
            })
            .expect("failed to spawn key reader thread");

        Self {
            handle: Some(handle),
            stop,
        }
    }

    /// Signal the reader thread to stop and wait for it to exit.
    ///
    /// Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn reader_loop<T>(fd: RawFd, tx: &Sender<T>, wrap: &dyn Fn(Key) -> T, stop: &AtomicBool) {
        let mut buf = [0u8; KEY_BUF_SIZE];

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            let ready = unsafe {
                let mut pfd = libc::pollfd {
                    fd,
                    events: libc::POLLIN,
                    revents: 0,
                };
                libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS)
            };

            if ready < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                tracing::warn!(%err, "key reader poll failed");
                break;
            }
            if ready == 0 {
                continue;
            }

            buf.fill(0);
            let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };

            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                tracing::warn!(%err, "key read failed");
                break;
            }
            if n == 0 {
                break;
            }

            #[allow(clippy::cast_sign_loss)] // n > 0 guaranteed above.
            let key = input::decode(&buf[..n as usize]);

            if tx.send(wrap(key)).is_err() {
                break;
            }
        }
    }
}

impl Drop for KeyReader {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
