//! Port definitions (hexagonal architecture)
//!
//! Traits that adapter crates implement. The core never depends on a
//! concrete storage backend or network transport.

pub mod remote_sync;
pub mod storage;

pub use remote_sync::IRemoteSync;
pub use storage::IStorage;
