//! Pending-changes counters and the badge aggregator
//!
//! [`PendingChanges`] counts uncommitted local mutations to the expense
//! set. The owning store increments a counter on every create/update/
//! delete; only a successful sync covering those changes resets them.
//!
//! [`pending_sync_count`] combines the counters with the settings drift
//! flags into the single number shown on the sync badge. It is a pure
//! function: recomputing it on input changes is the caller's job.

use serde::{Deserialize, Serialize};

/// Counters of uncommitted local mutations to the expense set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChanges {
    added: u32,
    edited: u32,
    deleted: u32,
}

impl PendingChanges {
    /// Number of expenses created since the last successful sync
    pub fn added(&self) -> u32 {
        self.added
    }

    /// Number of expenses edited since the last successful sync
    pub fn edited(&self) -> u32 {
        self.edited
    }

    /// Number of expenses deleted since the last successful sync
    pub fn deleted(&self) -> u32 {
        self.deleted
    }

    /// Sum of all counters
    pub fn total(&self) -> u32 {
        self.added + self.edited + self.deleted
    }

    /// Returns true if no mutations are pending
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Records a created expense
    pub fn record_added(&mut self) {
        self.added += 1;
    }

    /// Records an edited expense
    pub fn record_edited(&mut self) {
        self.edited += 1;
    }

    /// Records a deleted expense
    pub fn record_deleted(&mut self) {
        self.deleted += 1;
    }

    /// Zeroes every counter after a successful sync
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether settings participate in sync, and whether they drifted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSyncFlags {
    /// Settings are included in sync runs
    pub sync_settings_enabled: bool,
    /// Settings changed since the last successful sync
    pub has_unsynced_settings_changes: bool,
}

/// Combines pending counters and settings drift into the badge count
///
/// `added + edited + deleted`, plus one when settings sync is enabled and
/// settings have drifted. Pure, no side effects.
pub fn pending_sync_count(pending: &PendingChanges, flags: &SettingsSyncFlags) -> u32 {
    let settings_pending =
        u32::from(flags.sync_settings_enabled && flags.has_unsynced_settings_changes);
    pending.total() + settings_pending
}

/// Derives the sync button label from the machine state and badge count
///
/// Deterministic: identical inputs always yield identical text. The
/// syncing state wins regardless of the count.
pub fn sync_button_label(is_syncing: bool, count: u32) -> String {
    if is_syncing {
        "Syncing...".to_string()
    } else if count > 0 {
        format!("Sync Now ({count})")
    } else {
        "Sync Now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(added: u32, edited: u32, deleted: u32) -> PendingChanges {
        let mut p = PendingChanges::default();
        for _ in 0..added {
            p.record_added();
        }
        for _ in 0..edited {
            p.record_edited();
        }
        for _ in 0..deleted {
            p.record_deleted();
        }
        p
    }

    #[test]
    fn test_counters_accumulate() {
        let p = pending(2, 1, 3);
        assert_eq!(p.added(), 2);
        assert_eq!(p.edited(), 1);
        assert_eq!(p.deleted(), 3);
        assert_eq!(p.total(), 6);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut p = pending(1, 1, 1);
        p.reset();
        assert!(p.is_empty());
        assert_eq!(p, PendingChanges::default());
    }

    #[test]
    fn test_count_without_settings_drift() {
        let flags = SettingsSyncFlags::default();
        assert_eq!(pending_sync_count(&pending(0, 0, 0), &flags), 0);
        assert_eq!(pending_sync_count(&pending(2, 1, 0), &flags), 3);
    }

    #[test]
    fn test_count_with_settings_drift() {
        let flags = SettingsSyncFlags {
            sync_settings_enabled: true,
            has_unsynced_settings_changes: true,
        };
        // Example from the product requirements: {2,1,0} + drift = 4
        assert_eq!(pending_sync_count(&pending(2, 1, 0), &flags), 4);
        assert_eq!(pending_sync_count(&pending(0, 0, 0), &flags), 1);
    }

    #[test]
    fn test_drift_ignored_when_sync_disabled() {
        let flags = SettingsSyncFlags {
            sync_settings_enabled: false,
            has_unsynced_settings_changes: true,
        };
        assert_eq!(pending_sync_count(&pending(1, 0, 0), &flags), 1);
    }

    #[test]
    fn test_enabled_without_drift_adds_nothing() {
        let flags = SettingsSyncFlags {
            sync_settings_enabled: true,
            has_unsynced_settings_changes: false,
        };
        assert_eq!(pending_sync_count(&pending(0, 1, 0), &flags), 1);
    }

    #[test]
    fn test_button_label() {
        assert_eq!(sync_button_label(true, 0), "Syncing...");
        assert_eq!(sync_button_label(true, 7), "Syncing...");
        assert_eq!(sync_button_label(false, 0), "Sync Now");
        assert_eq!(sync_button_label(false, 3), "Sync Now (3)");
    }

    #[test]
    fn test_button_label_deterministic() {
        assert_eq!(sync_button_label(false, 2), sync_button_label(false, 2));
    }
}
