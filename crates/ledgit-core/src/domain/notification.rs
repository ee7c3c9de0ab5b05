//! User-facing alert entity
//!
//! A [`Notification`] is one entry in the bounded on-screen queue. The
//! store assigns ids and enforces the bound; this module only defines
//! the entity. Id uniqueness is the contract, the generation scheme is
//! not: v4 UUIDs are used here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default on-screen lifetime before the caller removes the entry
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5_000;

/// Visual category of a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A sync or save completed
    Success,
    /// Something failed and needs attention
    Error,
    /// Neutral information
    #[default]
    Info,
    /// Something is off but not fatal
    Warning,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        };
        write!(f, "{}", s)
    }
}

/// A user-facing alert with a bounded on-screen lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id, used for targeted removal
    pub id: String,
    /// Message shown to the user
    pub message: String,
    /// Visual category
    pub kind: NotificationKind,
    /// On-screen lifetime in milliseconds (positive)
    pub duration_ms: u64,
}

impl Notification {
    /// Creates a notification with a fresh unique id
    pub fn new(message: impl Into<String>, kind: NotificationKind, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            kind,
            duration_ms,
        }
    }

    /// Creates an info notification with the default duration
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info, DEFAULT_NOTIFICATION_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Notification::info("one");
        let b = Notification::info("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_defaults() {
        let n = Notification::info("hello");
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(n.duration_ms, DEFAULT_NOTIFICATION_DURATION_MS);
        assert_eq!(n.message, "hello");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NotificationKind::Success.to_string(), "success");
        assert_eq!(NotificationKind::Error.to_string(), "error");
        assert_eq!(NotificationKind::Info.to_string(), "info");
        assert_eq!(NotificationKind::Warning.to_string(), "warning");
    }

    #[test]
    fn test_kind_default() {
        assert_eq!(NotificationKind::default(), NotificationKind::Info);
    }
}
