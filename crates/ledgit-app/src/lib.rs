//! Ledgit App - composition root
//!
//! Wires the one shared instance of every store and the sync machine
//! into an [`AppContext`](context::AppContext), bridges completed-sync
//! outcomes into user notifications, and initializes tracing.

pub mod context;
pub mod telemetry;

pub use context::AppContext;
