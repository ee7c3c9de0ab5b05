//! Ledgit Sync - the sync lifecycle actor and outcome broadcast
//!
//! [`SyncMachine`](machine::SyncMachine) owns the live lifecycle state
//! (one shared instance process-wide) and drives the `IRemoteSync`
//! transport. [`SyncEmitter`](emitter::SyncEmitter) decouples "a sync
//! produced N file changes" from "show a toast about it".

pub mod emitter;
pub mod machine;

pub use emitter::{Subscription, SyncEmitter};
pub use machine::SyncMachine;
