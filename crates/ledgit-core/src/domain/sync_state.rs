//! Sync lifecycle state machine (pure part)
//!
//! ```text
//!              SYNC                COMPLETE
//!     ┌──────┐ ────► ┌─────────┐ ──────────► ┌─────────┐
//!     │ Idle │       │ Syncing │             │ Success │
//!     └──────┘ ◄──── └─────────┘ ──────────► └─────────┘
//!        ▲    RESET       │         ERROR         │
//!        │                ▼                       │
//!        │           ┌─────────┐      RESET       │
//!        └────────── │  Error  │ ◄────────────────┘
//!                    └─────────┘   (auto after display delay)
//! ```
//!
//! The machine is cyclic: there is no terminal phase. Any event not in
//! the table is an explicit no-op, never an error. The actor that owns
//! the live state lives in `ledgit-sync`; this module is pure data plus
//! the transition function, so the whole table is unit-testable without
//! a runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::SyncOutcome;

/// Phase of the sync lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// No sync in flight; the only phase that accepts `Sync`
    #[default]
    Idle,
    /// A run is in flight; resolves to `Success` or `Error`, never hangs
    Syncing,
    /// Last run completed; shown briefly, then reset to `Idle`
    Success,
    /// Last run failed, with an advisory message; cleared by `Reset`
    Error(String),
}

impl SyncPhase {
    /// Returns true while a run is in flight
    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncPhase::Syncing)
    }

    /// Returns true if the phase accepts a new `Sync` event
    pub fn can_start_sync(&self) -> bool {
        matches!(self, SyncPhase::Idle)
    }

    /// Returns the error message when in the error phase
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SyncPhase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the phase name as a string (without error details)
    pub fn name(&self) -> &'static str {
        match self {
            SyncPhase::Idle => "Idle",
            SyncPhase::Syncing => "Syncing",
            SyncPhase::Success => "Success",
            SyncPhase::Error(_) => "Error",
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPhase::Idle => write!(f, "idle"),
            SyncPhase::Syncing => write!(f, "syncing"),
            SyncPhase::Success => write!(f, "success"),
            SyncPhase::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// Event fed to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// User or background trigger requests a sync
    Sync,
    /// The in-flight run finished with this outcome
    Complete(SyncOutcome),
    /// The in-flight run failed with this advisory message
    Error(String),
    /// Return from `Success`/`Error` to `Idle`
    Reset,
}

impl SyncEvent {
    /// Returns the event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SyncEvent::Sync => "Sync",
            SyncEvent::Complete(_) => "Complete",
            SyncEvent::Error(_) => "Error",
            SyncEvent::Reset => "Reset",
        }
    }
}

/// Result of applying an event to a phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The event moves the machine to this phase
    To(SyncPhase),
    /// The event is a documented no-op in this phase
    Ignored,
}

/// The transition table
///
/// | From    | Event    | To      |
/// |---------|----------|---------|
/// | Idle    | Sync     | Syncing |
/// | Syncing | Complete | Success |
/// | Syncing | Error    | Error   |
/// | Success | Reset    | Idle    |
/// | Error   | Reset    | Idle    |
///
/// Everything else is [`Transition::Ignored`]: at most one sync may be
/// in flight, requests are never queued, and `Reset` from `Idle` or
/// `Syncing` does nothing.
pub fn transition(current: &SyncPhase, event: &SyncEvent) -> Transition {
    match (current, event) {
        (SyncPhase::Idle, SyncEvent::Sync) => Transition::To(SyncPhase::Syncing),
        (SyncPhase::Syncing, SyncEvent::Complete(_)) => Transition::To(SyncPhase::Success),
        (SyncPhase::Syncing, SyncEvent::Error(msg)) => {
            Transition::To(SyncPhase::Error(msg.clone()))
        }
        (SyncPhase::Success, SyncEvent::Reset) => Transition::To(SyncPhase::Idle),
        (SyncPhase::Error(_), SyncEvent::Reset) => Transition::To(SyncPhase::Idle),
        _ => Transition::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> SyncOutcome {
        SyncOutcome::new(1, 0, "done")
    }

    #[test]
    fn test_happy_path() {
        assert_eq!(
            transition(&SyncPhase::Idle, &SyncEvent::Sync),
            Transition::To(SyncPhase::Syncing)
        );
        assert_eq!(
            transition(&SyncPhase::Syncing, &SyncEvent::Complete(outcome())),
            Transition::To(SyncPhase::Success)
        );
        assert_eq!(
            transition(&SyncPhase::Success, &SyncEvent::Reset),
            Transition::To(SyncPhase::Idle)
        );
    }

    #[test]
    fn test_error_path() {
        assert_eq!(
            transition(&SyncPhase::Syncing, &SyncEvent::Error("offline".into())),
            Transition::To(SyncPhase::Error("offline".into()))
        );
        assert_eq!(
            transition(&SyncPhase::Error("offline".into()), &SyncEvent::Reset),
            Transition::To(SyncPhase::Idle)
        );
    }

    #[test]
    fn test_sync_is_noop_outside_idle() {
        for phase in [
            SyncPhase::Syncing,
            SyncPhase::Success,
            SyncPhase::Error("e".into()),
        ] {
            assert_eq!(transition(&phase, &SyncEvent::Sync), Transition::Ignored);
        }
    }

    #[test]
    fn test_reset_is_noop_from_idle_and_syncing() {
        assert_eq!(transition(&SyncPhase::Idle, &SyncEvent::Reset), Transition::Ignored);
        assert_eq!(transition(&SyncPhase::Syncing, &SyncEvent::Reset), Transition::Ignored);
    }

    #[test]
    fn test_completion_events_need_in_flight_run() {
        for phase in [SyncPhase::Idle, SyncPhase::Success, SyncPhase::Error("e".into())] {
            assert_eq!(
                transition(&phase, &SyncEvent::Complete(outcome())),
                Transition::Ignored
            );
            assert_eq!(
                transition(&phase, &SyncEvent::Error("boom".into())),
                Transition::Ignored
            );
        }
    }

    #[test]
    fn test_only_error_carries_message() {
        let phase = SyncPhase::Error("remote unreachable".into());
        assert_eq!(phase.error_message(), Some("remote unreachable"));
        assert_eq!(SyncPhase::Idle.error_message(), None);
    }

    #[test]
    fn test_phase_helpers() {
        assert!(SyncPhase::Syncing.is_syncing());
        assert!(!SyncPhase::Idle.is_syncing());
        assert!(SyncPhase::Idle.can_start_sync());
        assert!(!SyncPhase::Success.can_start_sync());
        assert_eq!(SyncPhase::default(), SyncPhase::Idle);
    }

    #[test]
    fn test_display() {
        assert_eq!(SyncPhase::Idle.to_string(), "idle");
        assert_eq!(SyncPhase::Syncing.to_string(), "syncing");
        assert_eq!(SyncPhase::Success.to_string(), "success");
        assert_eq!(SyncPhase::Error("x".into()).to_string(), "error: x");
        assert_eq!(SyncPhase::Error("x".into()).name(), "Error");
    }
}
