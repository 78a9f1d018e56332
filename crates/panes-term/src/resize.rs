// SPDX-License-Identifier: MIT
//
// Resize notification — SIGWINCH in, new terminal size out.
//
// `ResizeNotifier` registers for SIGWINCH through signal-hook and blocks in
// `wait()` until the next delivery, then asks for the fresh size. Signals
// that arrive while nobody is waiting stay pending and wake the next
// `wait()` immediately, so a burst of resizes is never lost (it may be
// coalesced into one notification).
//
// `ResizeWatcher` runs a notifier on its own thread and forwards each size
// into a caller-owned channel, next to the key reader's messages.

use std::os::unix::io::RawFd;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use signal_hook::iterator::{Handle, Signals};

use crate::device::Size;
use crate::error::{Error, Result};
use crate::terminal;

type SizeQuery = Box<dyn Fn() -> Result<Size> + Send>;

// ─── ResizeNotifier ─────────────────────────────────────────────────────────

/// Blocking source of window-change notifications.
pub struct ResizeNotifier {
    signals: Signals,
    query: SizeQuery,
}

impl ResizeNotifier {
    /// Watch the terminal behind `fd`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signal`] if the SIGWINCH handler cannot be
    /// registered.
    pub fn new(fd: RawFd) -> Result<Self> {
        Self::with_query(move || terminal::get_size(fd))
    }

    /// Watch for SIGWINCH, reporting sizes from `query`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signal`] if the handler cannot be registered.
    pub fn with_query<F>(query: F) -> Result<Self>
    where
        F: Fn() -> Result<Size> + Send + 'static,
    {
        let signals = Signals::new([libc::SIGWINCH]).map_err(Error::Signal)?;
        Ok(Self {
            signals,
            query: Box::new(query),
        })
    }

    /// Block until the next resize and return the new size.
    ///
    /// Returns `Ok(None)` once the notifier's [`Handle`] has been closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Size`] if the size query after the signal fails.
    pub fn wait(&mut self) -> Result<Option<Size>> {
        match self.signals.forever().next() {
            Some(_) => (self.query)().map(Some),
            None => Ok(None),
        }
    }

    /// Handle that unblocks [`wait`](Self::wait) from another thread.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.signals.handle()
    }
}

// ─── ResizeWatcher ──────────────────────────────────────────────────────────

/// Background thread forwarding resize notifications into a channel.
pub struct ResizeWatcher {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl ResizeWatcher {
    /// Watch the terminal behind `fd`, sending `wrap(size)` per resize.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signal`] if the SIGWINCH handler cannot be
    /// registered.
    pub fn spawn<T, F>(fd: RawFd, tx: Sender<T>, wrap: F) -> Result<Self>
    where
        T: Send + 'static,
        F: Fn(Size) -> T + Send + 'static,
    {
        Self::from_notifier(ResizeNotifier::new(fd)?, tx, wrap)
    }

    /// Run an existing notifier on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the thread cannot be spawned.
    pub fn from_notifier<T, F>(mut notifier: ResizeNotifier, tx: Sender<T>, wrap: F) -> Result<Self>
    where
        T: Send + 'static,
        F: Fn(Size) -> T + Send + 'static,
    {
        let handle = notifier.handle();
        let thread = thread::Builder::new()
            .name("resize-watcher".into())
            .spawn(move || loop {
                match notifier.wait() {
                    Ok(Some(size)) => {
                        tracing::debug!(cols = size.cols, rows = size.rows, "terminal resized");
                        if tx.send(wrap(size)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => tracing::warn!(%err, "resize size query failed"),
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    /// Stop watching and wait for the thread to exit. Idempotent.
    pub fn stop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
