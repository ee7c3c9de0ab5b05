//! Key-value storage port (driven/secondary port)
//!
//! The platform's async key-value persistence primitive, used verbatim
//! for the settings record and UI preference flags (e.g. the key
//! `payment_instruments_section_expanded` stores the literal strings
//! `"true"`/`"false"`).
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because failures are adapter-specific.
//! - A missing key is `Ok(None)`, not an error.
//! - Writes are durable once the returned future resolves; callers that
//!   fire-and-forget a write own the decision not to await it.

/// Port trait for async key-value persistence
#[async_trait::async_trait]
pub trait IStorage: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Removes the value stored under `key`; absent keys are a no-op
    async fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}
