// SPDX-License-Identifier: MIT
//
// Window events — kinds, parameters, listener tables.
//
// Each window keeps one table per event kind, keyed by a `u8` listener
// priority. Registering at an occupied priority replaces the listener.
// An emission snapshots the table for its kind and runs the snapshot in
// ascending priority order, either on the caller's thread (`Inline`) or on
// a fresh thread per emission (`Spawn`). With `Spawn` the caller never
// waits, and two emissions may run concurrently in any order.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};

/// What happened to a window.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// The window is about to draw.
    Draw,
    /// The window received a tick, carrying the key that caused it.
    Update,
    /// Application-defined.
    Custom(String),
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => f.write_str("draw"),
            Self::Update => f.write_str("update"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// One argument passed along with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventParam {
    Key(char),
    Control(bool),
}

/// A registered callback. Shared so an emission can snapshot the table.
pub type Listener = Arc<dyn Fn(&EventKind, &[EventParam]) + Send + Sync>;

/// How [`Listeners::emit`] runs a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// A new thread per emission; `emit` returns immediately.
    #[default]
    Spawn,
    /// Run on the caller's thread before `emit` returns.
    Inline,
}

// ─── Listeners ──────────────────────────────────────────────────────────────

/// Per-kind listener tables for one window.
#[derive(Clone, Default)]
pub struct Listeners {
    table: BTreeMap<EventKind, BTreeMap<u8, Listener>>,
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` at `priority` for each of `kinds`, replacing
    /// whatever was there.
    pub fn insert(&mut self, listener: &Listener, priority: u8, kinds: &[EventKind]) {
        for kind in kinds {
            self.table
                .entry(kind.clone())
                .or_default()
                .insert(priority, Arc::clone(listener));
        }
    }

    /// Deregister the listener at `priority` for `kind`. Returns whether
    /// one was removed.
    pub fn remove(&mut self, kind: &EventKind, priority: u8) -> bool {
        let Some(slots) = self.table.get_mut(kind) else {
            return false;
        };
        let removed = slots.remove(&priority).is_some();
        if slots.is_empty() {
            self.table.remove(kind);
        }
        removed
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn count(&self, kind: &EventKind) -> usize {
        self.table.get(kind).map_or(0, BTreeMap::len)
    }

    /// Run every listener for `kind` with `params`.
    ///
    /// Returns the size of the batch. If a dispatch thread cannot be
    /// spawned, the batch runs inline instead.
    pub fn emit(&self, dispatch: Dispatch, kind: &EventKind, params: Vec<EventParam>) -> usize {
        let batch: Vec<Listener> = match self.table.get(kind) {
            Some(slots) => slots.values().cloned().collect(),
            None => return 0,
        };
        let len = batch.len();
        tracing::trace!(%kind, listeners = len, ?dispatch, "emit");

        match dispatch {
            Dispatch::Inline => run_batch(&batch, kind, &params),
            Dispatch::Spawn => run_detached(&batch, kind, &params, spawn_named),
        }
        len
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.table.iter().map(|(kind, slots)| (kind, slots.keys().collect::<Vec<_>>())))
            .finish()
    }
}

fn run_batch(batch: &[Listener], kind: &EventKind, params: &[EventParam]) {
    for listener in batch {
        listener(kind, params);
    }
}

type Job = Box<dyn FnOnce() + Send>;

fn spawn_named(name: String, job: Job) -> io::Result<()> {
    thread::Builder::new().name(name).spawn(job).map(drop)
}

/// Hand the batch to `spawn`; run it here if that fails.
fn run_detached<S>(batch: &[Listener], kind: &EventKind, params: &[EventParam], spawn: S)
where
    S: FnOnce(String, Job) -> io::Result<()>,
{
    let job: Job = {
        let (batch, kind, params) = (batch.to_vec(), kind.clone(), params.to_vec());
        Box::new(move || run_batch(&batch, &kind, &params))
    };
    if let Err(err) = spawn(format!("emit-{kind}"), job) {
        tracing::warn!(%err, %kind, "cannot spawn event thread; dispatching inline");
        run_batch(batch, kind, params);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
