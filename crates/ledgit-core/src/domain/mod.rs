//! Domain entities and pure business rules
//!
//! Everything in this module is synchronous and free of I/O. The stores
//! and the sync actor build on these types.

pub mod errors;
pub mod notification;
pub mod outcome;
pub mod pending;
pub mod sync_config;
pub mod sync_state;

pub use errors::DomainError;
pub use notification::{Notification, NotificationKind, DEFAULT_NOTIFICATION_DURATION_MS};
pub use outcome::SyncOutcome;
pub use pending::{pending_sync_count, sync_button_label, PendingChanges, SettingsSyncFlags};
pub use sync_config::{SyncConfig, SyncConfigForm, DEFAULT_BRANCH};
pub use sync_state::{transition, SyncEvent, SyncPhase, Transition};
