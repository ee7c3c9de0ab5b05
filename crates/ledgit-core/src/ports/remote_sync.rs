//! Remote sync transport port (driven/secondary port)
//!
//! The opaque collaborator that diffs and pushes/pulls expense files
//! against the configured GitHub repository. The machine only reacts to
//! this call resolving; it imposes no clock of its own, so any timeout
//! policy belongs to the implementation behind this trait.

use crate::domain::outcome::SyncOutcome;
use crate::domain::sync_config::SyncConfig;

/// Port trait for the remote repository transport
///
/// ## Implementation Notes
///
/// - The config is captured by the caller at the start of the run and
///   stays fixed for its duration.
/// - A run that changed nothing returns an outcome with both counters
///   at zero; that is a success, not an error.
/// - Errors are advisory text for the user, not structured codes.
#[async_trait::async_trait]
pub trait IRemoteSync: Send + Sync {
    /// Performs one sync run against the remote repository
    async fn sync(&self, config: &SyncConfig) -> anyhow::Result<SyncOutcome>;
}
