//! Sync lifecycle actor
//!
//! [`SyncMachine`] owns the live [`SyncPhase`] and is the single shared
//! instance every UI observer reads from - never per-screen copies, so
//! no observer sees a torn or stale view. State transitions are applied
//! synchronously under a mutex (and reflected into a `watch` channel
//! before the triggering call returns); the only async boundary is the
//! transport run itself, which is spawned and feeds its completion back
//! in as a `Complete`/`Error` event.
//!
//! ## Lifecycle
//!
//! - `trigger_sync` is accepted only in `Idle`; at most one run is in
//!   flight and requests are never queued.
//! - A finished run that changed nothing (both counters zero) does not
//!   publish to the emitter.
//! - `Success` auto-resets to `Idle` after a display delay.
//! - `stop()` is terminal: further events are ignored and a fresh
//!   instance is required to sync again.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use ledgit_core::domain::outcome::SyncOutcome;
use ledgit_core::domain::sync_config::SyncConfig;
use ledgit_core::domain::sync_state::{transition, SyncEvent, SyncPhase, Transition};
use ledgit_core::ports::remote_sync::IRemoteSync;

use crate::emitter::SyncEmitter;

struct MachineInner {
    phase: SyncPhase,
    stopped: bool,
    // Bumped on every applied transition; display timers carry the
    // generation of the Success they were scheduled for.
    run_gen: u64,
}

struct MachineCore {
    inner: Mutex<MachineInner>,
    state_tx: watch::Sender<SyncPhase>,
    emitter: SyncEmitter,
    transport: Arc<dyn IRemoteSync>,
    success_display: Duration,
}

/// Handle to the shared sync lifecycle actor
///
/// Cloning the handle shares the one underlying actor; it never creates
/// a second machine.
#[derive(Clone)]
pub struct SyncMachine {
    core: Arc<MachineCore>,
}

impl SyncMachine {
    /// Creates a machine in `Idle` over the given transport
    ///
    /// `success_display` is how long the `Success` phase is shown before
    /// the machine resets itself to `Idle`.
    pub fn new(transport: Arc<dyn IRemoteSync>, success_display: Duration) -> Self {
        let (state_tx, _) = watch::channel(SyncPhase::Idle);
        Self {
            core: Arc::new(MachineCore {
                inner: Mutex::new(MachineInner {
                    phase: SyncPhase::Idle,
                    stopped: false,
                    run_gen: 0,
                }),
                state_tx,
                emitter: SyncEmitter::new(),
                transport,
                success_display,
            }),
        }
    }

    /// Returns the emitter that broadcasts completed-sync outcomes
    pub fn emitter(&self) -> &SyncEmitter {
        &self.core.emitter
    }

    /// Returns the current phase
    pub fn phase(&self) -> SyncPhase {
        self.core
            .inner
            .lock()
            .expect("machine mutex poisoned")
            .phase
            .clone()
    }

    /// Returns true while a run is in flight
    pub fn is_syncing(&self) -> bool {
        self.phase().is_syncing()
    }

    /// Returns true once the machine has been stopped
    pub fn is_stopped(&self) -> bool {
        self.core.inner.lock().expect("machine mutex poisoned").stopped
    }

    /// Subscribes a read-only observer to phase changes
    pub fn subscribe(&self) -> watch::Receiver<SyncPhase> {
        self.core.state_tx.subscribe()
    }

    /// Requests a sync run with the given captured configuration
    ///
    /// No-op outside `Idle` (the request is ignored, not queued) and
    /// after `stop()`. Returns whether a run was started. The phase is
    /// `Syncing` before this returns; the transport runs as a spawned
    /// background task whose resolution feeds `Complete`/`Error` back in.
    pub fn trigger_sync(&self, config: SyncConfig) -> bool {
        if self.core.apply(SyncEvent::Sync).is_none() {
            warn!(phase = %self.phase(), "Sync request ignored, only Idle accepts a new run");
            return false;
        }

        info!(repo = config.repo(), branch = config.branch(), "Sync started");

        let core = Arc::clone(&self.core);
        tokio::spawn(async move {
            match core.transport.sync(&config).await {
                Ok(outcome) => MachineCore::complete(&core, outcome),
                Err(err) => core.fail(format!("{err:#}")),
            }
        });

        true
    }

    /// Returns from `Success`/`Error` to `Idle`; no-op elsewhere
    pub fn reset(&self) {
        self.core.apply(SyncEvent::Reset);
    }

    /// Terminally stops the machine (app teardown)
    ///
    /// Every subsequent event is ignored. There is no restart; construct
    /// a fresh instance to resume sync capability.
    pub fn stop(&self) {
        let mut inner = self.core.inner.lock().expect("machine mutex poisoned");
        if !inner.stopped {
            inner.stopped = true;
            info!(phase = %inner.phase, "Sync machine stopped");
        }
    }
}

impl MachineCore {
    /// Resolution path for a successful transport run
    fn complete(core: &Arc<Self>, outcome: SyncOutcome) {
        let Some(gen) = core.apply(SyncEvent::Complete(outcome.clone())) else {
            return;
        };

        info!(
            local = outcome.local_files_updated,
            remote = outcome.remote_files_updated,
            "Sync completed"
        );

        if outcome.has_changes() {
            core.emitter.publish(&outcome);
        } else {
            debug!("No-op sync, skipping outcome publish");
        }

        // Show the success phase briefly, then return to idle. The timer
        // is pinned to this run's generation: a manual reset or a newer
        // run invalidates it, so it can never truncate a later window.
        let core = Arc::clone(core);
        tokio::spawn(async move {
            tokio::time::sleep(core.success_display).await;
            core.reset_expired(gen);
        });
    }

    /// Resolution path for a failed transport run
    fn fail(&self, message: String) {
        error!(%message, "Sync failed");
        self.apply(SyncEvent::Error(message));
    }

    /// Applies one event; returns the new generation when the phase changed
    ///
    /// The phase and the watch value are updated together under the
    /// lock, so an observer reading after a triggering call returns
    /// always sees a state at least as new as that call's effect.
    fn apply(&self, event: SyncEvent) -> Option<u64> {
        let mut inner = self.inner.lock().expect("machine mutex poisoned");

        if inner.stopped {
            debug!(event = event.name(), "Event after stop, ignoring");
            return None;
        }

        match transition(&inner.phase, &event) {
            Transition::To(next) => {
                debug!(from = %inner.phase, to = %next, event = event.name(), "Phase transition");
                inner.run_gen = inner.run_gen.wrapping_add(1);
                inner.phase = next.clone();
                self.state_tx.send_replace(next);
                Some(inner.run_gen)
            }
            Transition::Ignored => {
                debug!(phase = %inner.phase, event = event.name(), "Ignoring event (no-op in this phase)");
                None
            }
        }
    }

    /// Delayed auto-reset for the success window identified by `gen`
    ///
    /// Any transition bumps the generation, so a timer scheduled for an
    /// earlier window finds a mismatch here and does nothing.
    fn reset_expired(&self, gen: u64) {
        let mut inner = self.inner.lock().expect("machine mutex poisoned");
        if inner.stopped || inner.run_gen != gen {
            debug!(gen, current = inner.run_gen, "Stale display timer, ignoring");
            return;
        }

        // Generation matched, so the phase is still this run's Success.
        if let Transition::To(next) = transition(&inner.phase, &SyncEvent::Reset) {
            debug!(from = %inner.phase, to = %next, "Display window elapsed");
            inner.run_gen = inner.run_gen.wrapping_add(1);
            inner.phase = next.clone();
            self.state_tx.send_replace(next);
        }
    }
}
