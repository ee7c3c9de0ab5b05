//! Ledgit demo daemon (ledgitd)
//!
//! Wires the app context over file-backed storage and a stub transport,
//! triggers a single sync run, and logs what happened. The stub stands
//! in for the real GitHub transport; it resolves after a short delay
//! and reports one pulled file.
//!
//! Configure the remote once via environment variables:
//! `LEDGIT_TOKEN`, `LEDGIT_REPO` (owner/name), `LEDGIT_BRANCH`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use ledgit_app::telemetry;
use ledgit_app::AppContext;
use ledgit_core::config::Config;
use ledgit_core::domain::outcome::SyncOutcome;
use ledgit_core::domain::sync_config::SyncConfig;
use ledgit_core::domain::sync_state::SyncPhase;
use ledgit_core::ports::remote_sync::IRemoteSync;
use ledgit_stores::FileStorage;

/// Placeholder transport until the real GitHub adapter lands
struct StubRemote;

#[async_trait::async_trait]
impl IRemoteSync for StubRemote {
    async fn sync(&self, config: &SyncConfig) -> Result<SyncOutcome> {
        info!(repo = config.repo(), branch = config.branch(), "Stub transport running");
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(SyncOutcome::new(1, 0, ""))
    }
}

fn storage_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ledgit")
        .join("settings.json")
}

/// Reads a remote configuration from the environment, if fully given
fn config_from_env() -> Option<Result<SyncConfig>> {
    let token = std::env::var("LEDGIT_TOKEN").ok()?;
    let repo = std::env::var("LEDGIT_REPO").ok()?;
    let branch =
        std::env::var("LEDGIT_BRANCH").unwrap_or_else(|_| "main".to_string());
    Some(SyncConfig::new(&token, &repo, &branch).context("Invalid remote configuration"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = Config::default_path();
    let config = Config::load_or_default(&config_path);
    telemetry::init_tracing(&config.logging);
    info!(config_path = %config_path.display(), "Ledgit daemon starting (ledgitd)");

    let storage = Arc::new(FileStorage::new(storage_path()));
    let context = AppContext::init(storage, Arc::new(StubRemote), config);

    context
        .settings()
        .load()
        .await
        .context("Failed to load settings")?;

    if let Some(remote) = config_from_env() {
        let remote = remote?;
        info!(repo = remote.repo(), "Storing remote configuration from environment");
        context
            .settings()
            .save(remote)
            .await
            .context("Persistence task aborted")??;
    }

    info!(
        pending = context.pending_count(),
        label = context.sync_label(),
        "State before sync"
    );

    let mut phases = context.machine().subscribe();
    if context.trigger_sync() {
        let terminal = phases
            .wait_for(|p| matches!(p, SyncPhase::Success | SyncPhase::Error(_)))
            .await
            .context("Sync machine dropped mid-run")?
            .clone();

        match terminal {
            SyncPhase::Error(message) => warn!(%message, "Sync run failed"),
            phase => info!(%phase, "Sync run finished"),
        }
    }

    for toast in context.notifications().snapshot() {
        info!(kind = %toast.kind, message = %toast.message, "Notification");
    }

    context.dispose();
    info!("Ledgit daemon shut down");
    Ok(())
}
