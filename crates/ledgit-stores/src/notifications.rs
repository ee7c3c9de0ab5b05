//! Notification store - bounded, ordered queue of user-facing alerts
//!
//! Holds at most [`NotificationStore::max_visible`] entries, appending at
//! the back and dropping from the front on overflow, so the retained list
//! is always a suffix of the logical append history in call order. The
//! store performs no time-based eviction of its own; callers schedule
//! removal with an [`ExpiryTimer`], which cancels itself on every exit
//! path.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use ledgit_core::domain::notification::{Notification, NotificationKind};

/// Default bound on retained notifications
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Bounded queue of user-facing alerts
///
/// One instance is shared process-wide; UI observers read snapshots or
/// subscribe to the watch channel and never mutate internals directly.
pub struct NotificationStore {
    entries: Mutex<Vec<Notification>>,
    max_visible: usize,
    watch_tx: watch::Sender<Vec<Notification>>,
}

impl NotificationStore {
    /// Creates a store retaining at most `max_visible` notifications
    pub fn new(max_visible: usize) -> Self {
        let (watch_tx, _) = watch::channel(Vec::new());
        Self {
            entries: Mutex::new(Vec::new()),
            max_visible: max_visible.max(1),
            watch_tx,
        }
    }

    /// Returns the retention bound
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Appends a notification, evicting the oldest beyond the bound
    ///
    /// Assigns a fresh unique id. Returns the id so callers can schedule
    /// removal after `duration_ms`.
    pub fn add(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration_ms: u64,
    ) -> String {
        let notification = Notification::new(message, kind, duration_ms);
        let id = notification.id.clone();

        let snapshot = {
            let mut entries = self.entries.lock().expect("notification mutex poisoned");
            entries.push(notification);
            while entries.len() > self.max_visible {
                let evicted = entries.remove(0);
                debug!(id = %evicted.id, "Evicting oldest notification (bound reached)");
            }
            entries.clone()
        };

        debug!(id = %id, kind = %kind, "Notification added");
        let _ = self.watch_tx.send(snapshot);
        id
    }

    /// Appends an info notification with the default duration
    pub fn add_info(&self, message: impl Into<String>) -> String {
        self.add(
            message,
            NotificationKind::Info,
            ledgit_core::domain::notification::DEFAULT_NOTIFICATION_DURATION_MS,
        )
    }

    /// Removes the notification with `id`; an absent id is a no-op
    pub fn remove(&self, id: &str) {
        let snapshot = {
            let mut entries = self.entries.lock().expect("notification mutex poisoned");
            let before = entries.len();
            entries.retain(|n| n.id != id);
            if entries.len() == before {
                debug!(id, "Remove for unknown notification id, ignoring");
                return;
            }
            entries.clone()
        };

        debug!(id, "Notification removed");
        let _ = self.watch_tx.send(snapshot);
    }

    /// Returns the current notification list, oldest first
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }

    /// Subscribes a read-only observer to the notification list
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.watch_tx.subscribe()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VISIBLE)
    }
}

/// Scoped expiry timer for one notification
///
/// Spawns a delayed [`NotificationStore::remove`] for `id`. Dropping the
/// guard aborts the pending removal, so a notification dismissed early
/// (or a view unmounting) never races a stale timer.
pub struct ExpiryTimer {
    handle: tokio::task::JoinHandle<()>,
}

impl ExpiryTimer {
    /// Schedules removal of `id` after `delay`
    pub fn schedule(store: Arc<NotificationStore>, id: String, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.remove(&id);
        });
        Self { handle }
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
