//! Sync outcome broadcast channel
//!
//! A registration-based emitter: [`SyncEmitter::subscribe`] returns a
//! [`Subscription`] disposer, [`SyncEmitter::publish`] invokes the
//! listeners registered at that moment synchronously and in registration
//! order, exactly once each. Nothing is queued or replayed for later
//! subscribers. A panicking listener is absorbed so the remaining
//! listeners still get their delivery.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, warn};

use ledgit_core::domain::outcome::SyncOutcome;

type Listener = Arc<dyn Fn(&SyncOutcome) + Send + Sync>;

#[derive(Default)]
struct EmitterInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Broadcast channel for completed-sync outcomes
#[derive(Clone, Default)]
pub struct SyncEmitter {
    inner: Arc<Mutex<EmitterInner>>,
}

impl SyncEmitter {
    /// Creates an emitter with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; the returned disposer removes it
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SyncOutcome) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().expect("emitter mutex poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        debug!(listener_id = id, "Sync listener registered");

        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers `outcome` to every currently-registered listener
    ///
    /// Synchronous, in registration order, exactly once per listener.
    /// Publishing with no listeners is a documented no-op. Callers only
    /// publish outcomes that represent an actual change; the machine
    /// enforces that.
    pub fn publish(&self, outcome: &SyncOutcome) {
        // Snapshot under the lock, invoke outside it, so a listener that
        // subscribes or unsubscribes during delivery cannot deadlock.
        let listeners: Vec<(u64, Listener)> = {
            let inner = self.inner.lock().expect("emitter mutex poisoned");
            inner.listeners.clone()
        };

        if listeners.is_empty() {
            debug!("Publish with no listeners, nothing to do");
            return;
        }

        for (id, listener) in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(outcome))).is_err() {
                warn!(listener_id = id, "Sync listener panicked, continuing delivery");
            }
        }
    }

    /// Number of currently-registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner
            .lock()
            .expect("emitter mutex poisoned")
            .listeners
            .len()
    }
}

/// Disposer handle for one registered listener
///
/// [`unsubscribe`](Subscription::unsubscribe) is idempotent: calling it
/// repeatedly, or after the emitter is gone, never panics and never
/// affects other listeners. Dropping the handle does NOT unsubscribe;
/// removal is always explicit.
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<EmitterInner>>,
}

impl Subscription {
    /// Removes the listener this handle was created for
    pub fn unsubscribe(&self) {
        let Some(inner) = self.inner.upgrade() else {
            debug!(listener_id = self.id, "Unsubscribe after emitter dropped, ignoring");
            return;
        };
        let mut inner = inner.lock().expect("emitter mutex poisoned");
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != self.id);
        if inner.listeners.len() < before {
            debug!(listener_id = self.id, "Sync listener removed");
        }
    }
}
