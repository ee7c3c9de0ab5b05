//! Application context - the process-wide wiring of stores and machine
//!
//! [`AppContext`] owns the single shared instance of each concern: the
//! settings store, the notification store, the expense store, and the
//! sync machine. It installs the emitter-to-notification bridge (a
//! completed sync that changed files becomes a success toast) and a
//! watcher that clears pending counters when a run reaches `Success`.
//!
//! [`AppContext::init`] installs one context for the process lifetime;
//! repeated init returns the existing instance. Tests wire their own
//! non-global contexts through [`AppContext::build`].

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use ledgit_core::config::Config;
use ledgit_core::domain::notification::NotificationKind;
use ledgit_core::domain::outcome::SyncOutcome;
use ledgit_core::domain::pending::{pending_sync_count, sync_button_label};
use ledgit_core::domain::sync_state::SyncPhase;
use ledgit_core::ports::remote_sync::IRemoteSync;
use ledgit_core::ports::storage::IStorage;
use ledgit_stores::{ExpenseStore, NotificationStore, SettingsStore};
use ledgit_sync::{Subscription, SyncMachine};

static CONTEXT: OnceLock<Arc<AppContext>> = OnceLock::new();

/// Shared application context
pub struct AppContext {
    config: Config,
    settings: Arc<SettingsStore>,
    notifications: Arc<NotificationStore>,
    expenses: Arc<ExpenseStore>,
    machine: SyncMachine,
    toast_bridge: Subscription,
    success_watcher: JoinHandle<()>,
}

impl AppContext {
    /// Installs the process-wide context, or returns the existing one
    ///
    /// First access wins: arguments passed to a repeated init are
    /// discarded and the already-installed context is returned.
    pub fn init(
        storage: Arc<dyn IStorage>,
        transport: Arc<dyn IRemoteSync>,
        config: Config,
    ) -> Arc<Self> {
        let mut installed = false;
        let context = CONTEXT.get_or_init(|| {
            installed = true;
            Self::build(storage, transport, config)
        });
        if !installed {
            warn!("App context already initialized, returning the existing instance");
        }
        Arc::clone(context)
    }

    /// Returns the installed context, if any
    pub fn global() -> Option<Arc<Self>> {
        CONTEXT.get().cloned()
    }

    /// Constructs a context without installing it globally
    pub fn build(
        storage: Arc<dyn IStorage>,
        transport: Arc<dyn IRemoteSync>,
        config: Config,
    ) -> Arc<Self> {
        let settings = Arc::new(SettingsStore::new(storage));
        let notifications = Arc::new(NotificationStore::new(
            config.sync.max_visible_notifications,
        ));
        let expenses = Arc::new(ExpenseStore::new());
        let machine = SyncMachine::new(
            transport,
            Duration::from_millis(config.sync.success_display_ms),
        );

        let toast_bridge = Self::bridge_outcomes(
            &machine,
            Arc::clone(&notifications),
            config.sync.notification_duration_ms,
        );
        let success_watcher =
            Self::watch_success(&machine, Arc::clone(&expenses), Arc::clone(&settings));

        info!("App context constructed");
        Arc::new(Self {
            config,
            settings,
            notifications,
            expenses,
            machine,
            toast_bridge,
            success_watcher,
        })
    }

    /// Subscribes the toast bridge: changed-sync outcomes become notifications
    fn bridge_outcomes(
        machine: &SyncMachine,
        notifications: Arc<NotificationStore>,
        duration_ms: u64,
    ) -> Subscription {
        machine.emitter().subscribe(move |outcome| {
            let message = toast_message(outcome);
            notifications.add(message, NotificationKind::Success, duration_ms);
        })
    }

    /// Spawns the watcher that clears pending state once a run succeeds
    fn watch_success(
        machine: &SyncMachine,
        expenses: Arc<ExpenseStore>,
        settings: Arc<SettingsStore>,
    ) -> JoinHandle<()> {
        let mut rx = machine.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                if *rx.borrow_and_update() == SyncPhase::Success {
                    debug!("Run succeeded, clearing pending counters");
                    expenses.mark_synced();
                    settings.mark_synced();
                }
            }
        })
    }

    /// Requests a sync with the currently configured remote
    ///
    /// Unconfigured state is surfaced to the user as a warning
    /// notification, not an error. Returns whether a run was started.
    pub fn trigger_sync(&self) -> bool {
        match self.settings.sync_config() {
            Some(config) => self.machine.trigger_sync(config),
            None => {
                warn!("Sync requested without a configured remote");
                self.notifications.add(
                    "Sync is not configured",
                    NotificationKind::Warning,
                    self.config.sync.notification_duration_ms,
                );
                false
            }
        }
    }

    /// Badge count: pending expense mutations plus settings drift
    pub fn pending_count(&self) -> u32 {
        pending_sync_count(&self.expenses.pending(), &self.settings.flags())
    }

    /// Current sync button label
    pub fn sync_label(&self) -> String {
        sync_button_label(self.machine.is_syncing(), self.pending_count())
    }

    /// Tears the context down (app shutdown)
    ///
    /// Stops the machine terminally, detaches the toast bridge, and
    /// cancels the success watcher. Idempotent.
    pub fn dispose(&self) {
        self.machine.stop();
        self.toast_bridge.unsubscribe();
        self.success_watcher.abort();
        info!("App context disposed");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn notifications(&self) -> &Arc<NotificationStore> {
        &self.notifications
    }

    pub fn expenses(&self) -> &Arc<ExpenseStore> {
        &self.expenses
    }

    pub fn machine(&self) -> &SyncMachine {
        &self.machine
    }
}

/// Formats the user-facing message for a completed sync
///
/// The transport's advisory message wins when present; otherwise a
/// summary of the file counts is shown.
fn toast_message(outcome: &SyncOutcome) -> String {
    if outcome.message.is_empty() {
        format!(
            "Sync complete: {} local, {} remote file(s) updated",
            outcome.local_files_updated, outcome.remote_files_updated
        )
    } else {
        outcome.message.clone()
    }
}
