//! Settings store - sync configuration and UI preference persistence
//!
//! In-memory state is the source of truth for readers: every mutation
//! lands synchronously, then the durable write runs as a background
//! effect. Callers that need durability confirmation await the returned
//! persistence handle; a failed write surfaces there and never corrupts
//! the in-memory value.

use std::sync::{Arc, RwLock};

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use ledgit_core::domain::pending::SettingsSyncFlags;
use ledgit_core::domain::sync_config::SyncConfig;
use ledgit_core::ports::storage::IStorage;

/// Storage key for the serialized [`SyncConfig`] record
const SYNC_CONFIG_KEY: &str = "ledgit.sync_config";

/// Storage key for the settings-sync participation flag
const SYNC_SETTINGS_ENABLED_KEY: &str = "ledgit.sync_settings_enabled";

/// Storage key for the payment-instruments section UI preference.
/// The value is the literal string "true" or "false".
const INSTRUMENTS_EXPANDED_KEY: &str = "payment_instruments_section_expanded";

/// Completion handle for a background persistence write
pub type PersistHandle = JoinHandle<anyhow::Result<()>>;

#[derive(Debug, Default)]
struct SettingsState {
    sync_config: Option<SyncConfig>,
    flags: SettingsSyncFlags,
    instruments_expanded: bool,
}

/// Shared settings store over an [`IStorage`] adapter
pub struct SettingsStore {
    storage: Arc<dyn IStorage>,
    state: RwLock<SettingsState>,
}

impl SettingsStore {
    /// Creates a store over the given storage adapter (state starts unconfigured)
    pub fn new(storage: Arc<dyn IStorage>) -> Self {
        Self {
            storage,
            state: RwLock::new(SettingsState::default()),
        }
    }

    /// Hydrates in-memory state from storage
    ///
    /// A missing record reads as unconfigured; a corrupt record is
    /// discarded with a warning rather than poisoning the store.
    pub async fn load(&self) -> anyhow::Result<()> {
        let raw_config = self
            .storage
            .get_item(SYNC_CONFIG_KEY)
            .await
            .context("Failed to read sync config")?;

        let sync_config = match raw_config {
            Some(json) => match serde_json::from_str::<SyncConfig>(&json) {
                Ok(cfg) => Some(cfg),
                Err(err) => {
                    warn!(%err, "Discarding unreadable sync config record");
                    None
                }
            },
            None => None,
        };

        let sync_settings_enabled = matches!(
            self.storage
                .get_item(SYNC_SETTINGS_ENABLED_KEY)
                .await
                .context("Failed to read settings-sync flag")?
                .as_deref(),
            Some("true")
        );

        let instruments_expanded = matches!(
            self.storage
                .get_item(INSTRUMENTS_EXPANDED_KEY)
                .await
                .context("Failed to read UI preference")?
                .as_deref(),
            Some("true")
        );

        let mut state = self.state.write().expect("settings lock poisoned");
        let configured = sync_config.is_some();
        state.sync_config = sync_config;
        state.flags.sync_settings_enabled = sync_settings_enabled;
        state.instruments_expanded = instruments_expanded;
        drop(state);

        info!(configured, sync_settings_enabled, "Settings loaded");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sync configuration
    // ------------------------------------------------------------------

    /// Returns the current sync configuration, if configured
    pub fn sync_config(&self) -> Option<SyncConfig> {
        self.state
            .read()
            .expect("settings lock poisoned")
            .sync_config
            .clone()
    }

    /// Returns true when a remote repository is configured
    pub fn is_configured(&self) -> bool {
        self.state
            .read()
            .expect("settings lock poisoned")
            .sync_config
            .is_some()
    }

    /// Stores a validated config: memory immediately, disk in the background
    ///
    /// Readers see the new value as soon as this returns. Await the
    /// returned handle for durability confirmation; a write failure does
    /// not roll back the in-memory value.
    pub fn save(&self, config: SyncConfig) -> PersistHandle {
        {
            let mut state = self.state.write().expect("settings lock poisoned");
            state.sync_config = Some(config.clone());
        }
        info!("Sync configuration updated");

        let storage = Arc::clone(&self.storage);
        tokio::spawn(async move {
            let json = serde_json::to_string(&config).context("Failed to encode sync config")?;
            storage
                .set_item(SYNC_CONFIG_KEY, &json)
                .await
                .context("Failed to persist sync config")
        })
    }

    /// Disconnects the remote: clears memory now, removes the record in the background
    pub fn clear(&self) -> PersistHandle {
        {
            let mut state = self.state.write().expect("settings lock poisoned");
            state.sync_config = None;
        }
        info!("Sync configuration cleared");

        let storage = Arc::clone(&self.storage);
        tokio::spawn(async move {
            storage
                .remove_item(SYNC_CONFIG_KEY)
                .await
                .context("Failed to remove sync config")
        })
    }

    // ------------------------------------------------------------------
    // Settings-sync flags
    // ------------------------------------------------------------------

    /// Returns the current settings-sync flags
    pub fn flags(&self) -> SettingsSyncFlags {
        self.state.read().expect("settings lock poisoned").flags
    }

    /// Enables or disables settings participation in sync
    pub fn set_sync_settings_enabled(&self, enabled: bool) -> PersistHandle {
        {
            let mut state = self.state.write().expect("settings lock poisoned");
            state.flags.sync_settings_enabled = enabled;
        }
        debug!(enabled, "Settings-sync participation changed");

        let storage = Arc::clone(&self.storage);
        let value = if enabled { "true" } else { "false" };
        tokio::spawn(async move {
            storage
                .set_item(SYNC_SETTINGS_ENABLED_KEY, value)
                .await
                .context("Failed to persist settings-sync flag")
        })
    }

    /// Records that a synced setting drifted since the last sync
    ///
    /// Only takes effect while settings sync is enabled; the drift flag
    /// feeds the pending-count badge.
    pub fn mark_settings_changed(&self) {
        let mut state = self.state.write().expect("settings lock poisoned");
        if state.flags.sync_settings_enabled {
            state.flags.has_unsynced_settings_changes = true;
        }
    }

    /// Clears the drift flag after a successful sync
    pub fn mark_synced(&self) {
        let mut state = self.state.write().expect("settings lock poisoned");
        state.flags.has_unsynced_settings_changes = false;
    }

    // ------------------------------------------------------------------
    // UI preferences
    // ------------------------------------------------------------------

    /// Returns whether the payment-instruments section is expanded
    pub fn instruments_expanded(&self) -> bool {
        self.state
            .read()
            .expect("settings lock poisoned")
            .instruments_expanded
    }

    /// Sets the payment-instruments section preference
    ///
    /// Persists the literal strings "true"/"false" and marks settings
    /// drift when settings sync is enabled.
    pub fn set_instruments_expanded(&self, expanded: bool) -> PersistHandle {
        {
            let mut state = self.state.write().expect("settings lock poisoned");
            state.instruments_expanded = expanded;
            if state.flags.sync_settings_enabled {
                state.flags.has_unsynced_settings_changes = true;
            }
        }
        debug!(expanded, "UI preference changed");

        let storage = Arc::clone(&self.storage);
        let value = if expanded { "true" } else { "false" };
        tokio::spawn(async move {
            storage
                .set_item(INSTRUMENTS_EXPANDED_KEY, value)
                .await
                .context("Failed to persist UI preference")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    /// Storage stub whose writes always fail
    struct FailingStorage;

    #[async_trait::async_trait]
    impl IStorage for FailingStorage {
        async fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        async fn set_item(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }

        async fn remove_item(&self, _key: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn config() -> SyncConfig {
        SyncConfig::new("ghp_x", "o/r", "dev").unwrap()
    }

    #[tokio::test]
    async fn test_starts_unconfigured() {
        let store = SettingsStore::new(Arc::new(MemoryStorage::new()));
        store.load().await.unwrap();
        assert!(!store.is_configured());
        assert_eq!(store.sync_config(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let storage = Arc::new(MemoryStorage::new());

        let store = SettingsStore::new(Arc::clone(&storage) as Arc<dyn IStorage>);
        store.save(config()).await.unwrap().unwrap();

        // Fresh store over the same storage sees the persisted record.
        let reloaded = SettingsStore::new(storage);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.sync_config(), Some(config()));
    }

    #[tokio::test]
    async fn test_memory_updated_before_write_resolves() {
        let store = SettingsStore::new(Arc::new(MemoryStorage::new()));
        let handle = store.save(config());
        // Visible immediately, without awaiting the write.
        assert_eq!(store.sync_config(), Some(config()));
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_clear_then_load_is_unconfigured() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SettingsStore::new(Arc::clone(&storage) as Arc<dyn IStorage>);

        store.save(config()).await.unwrap().unwrap();
        store.clear().await.unwrap().unwrap();
        assert!(!store.is_configured());

        let reloaded = SettingsStore::new(storage);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.sync_config(), None);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_value() {
        let store = SettingsStore::new(Arc::new(FailingStorage));
        let handle = store.save(config());

        let result = handle.await.unwrap();
        assert!(result.is_err());
        // The in-memory value stays at its last written state.
        assert_eq!(store.sync_config(), Some(config()));
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_as_unconfigured() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(SYNC_CONFIG_KEY, "{not json").await.unwrap();

        let store = SettingsStore::new(storage);
        store.load().await.unwrap();
        assert!(!store.is_configured());
    }

    #[tokio::test]
    async fn test_drift_flag_requires_enabled_sync() {
        let store = SettingsStore::new(Arc::new(MemoryStorage::new()));

        store.mark_settings_changed();
        assert!(!store.flags().has_unsynced_settings_changes);

        store.set_sync_settings_enabled(true).await.unwrap().unwrap();
        store.mark_settings_changed();
        assert!(store.flags().has_unsynced_settings_changes);

        store.mark_synced();
        assert!(!store.flags().has_unsynced_settings_changes);
    }

    #[tokio::test]
    async fn test_instrument_preference_persists_literal_strings() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SettingsStore::new(Arc::clone(&storage) as Arc<dyn IStorage>);

        store.set_instruments_expanded(true).await.unwrap().unwrap();
        assert_eq!(
            storage.get_item(INSTRUMENTS_EXPANDED_KEY).await.unwrap(),
            Some("true".to_string())
        );

        store.set_instruments_expanded(false).await.unwrap().unwrap();
        assert_eq!(
            storage.get_item(INSTRUMENTS_EXPANDED_KEY).await.unwrap(),
            Some("false".to_string())
        );
    }

    #[tokio::test]
    async fn test_instrument_preference_marks_drift_when_enabled() {
        let store = SettingsStore::new(Arc::new(MemoryStorage::new()));
        store.set_sync_settings_enabled(true).await.unwrap().unwrap();

        store.set_instruments_expanded(true).await.unwrap().unwrap();
        assert!(store.flags().has_unsynced_settings_changes);
        assert!(store.instruments_expanded());
    }
}
