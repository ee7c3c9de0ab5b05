//! Sync outcome payload
//!
//! Produced once per completed sync run and handed to the emitter's
//! current listeners, then discarded. Never persisted.

use serde::{Deserialize, Serialize};

/// Summary of a completed sync run against the remote repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Number of local files updated by the run (pulled)
    pub local_files_updated: u32,
    /// Number of remote files updated by the run (pushed)
    pub remote_files_updated: u32,
    /// Advisory message from the transport
    pub message: String,
}

impl SyncOutcome {
    /// Creates a new outcome
    pub fn new(local_files_updated: u32, remote_files_updated: u32, message: impl Into<String>) -> Self {
        Self {
            local_files_updated,
            remote_files_updated,
            message: message.into(),
        }
    }

    /// Returns true if the run changed anything on either side
    ///
    /// A no-op sync (both counters zero) is never published to listeners
    /// and never reaches the notification store.
    pub fn has_changes(&self) -> bool {
        self.local_files_updated > 0 || self.remote_files_updated > 0
    }
}
