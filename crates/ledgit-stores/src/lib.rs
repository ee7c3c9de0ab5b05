//! Ledgit Stores - Shared mutable application stores
//!
//! One instance of each store exists per process (the composition root in
//! `ledgit-app` owns them). Mutations are synchronous with respect to the
//! caller; the only async boundary is persistence I/O, which runs as a
//! background effect.
//!
//! - [`NotificationStore`] - bounded, ordered queue of user-facing alerts
//! - [`SettingsStore`] - sync configuration and UI preference persistence
//! - [`ExpenseStore`] - the tracked entity set plus pending-change counters
//! - [`MemoryStorage`] / [`FileStorage`] - `IStorage` adapters

pub mod expenses;
pub mod notifications;
pub mod settings;
pub mod storage;

pub use expenses::{Expense, ExpenseStore};
pub use notifications::{ExpiryTimer, NotificationStore};
pub use settings::SettingsStore;
pub use storage::{FileStorage, MemoryStorage};
