//! Fire-and-forget actions scheduled by the state machine.
//!
//! Each action remembers the session epoch it was scheduled in. The session
//! advances its epoch whenever a newer interaction starts, so an action whose
//! epoch is stale by the time it runs is dropped instead of clobbering the
//! newer state.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    /// Drop the live trace and the error marker after an error.
    SoftClear,
    /// Return the session to its initial configuration after completion.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredAction {
    pub kind: DeferredKind,
    pub epoch: u64,
    pub due: Instant,
}

/// Pending actions ordered by insertion; deadlines are checked on [`drain_due`].
///
/// [`drain_due`]: DeferredQueue::drain_due
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: Vec<DeferredAction>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, kind: DeferredKind, epoch: u64, delay: Duration) -> DeferredAction {
        let action = DeferredAction {
            kind,
            epoch,
            due: Instant::now() + delay,
        };
        self.pending.push(action);
        action
    }

    /// Schedules `kind`, dropping any pending action of the same kind.
    ///
    /// Older entries can only carry the same or an earlier epoch, so they would
    /// be dropped as stale when run anyway.
    pub fn replace(&mut self, kind: DeferredKind, epoch: u64, delay: Duration) -> DeferredAction {
        self.pending.retain(|a| a.kind != kind);
        self.schedule(kind, epoch, delay)
    }

    /// Removes and returns every action due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<DeferredAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|a| a.due <= now);
        self.pending = pending;
        due.sort_by_key(|a| a.due);
        due
    }

    /// Forgets a specific action, e.g. once a host timer ran it.
    pub fn remove(&mut self, action: &DeferredAction) {
        self.pending.retain(|a| a != action);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|a| a.due).min()
    }

    pub fn pending(&self) -> &[DeferredAction] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
