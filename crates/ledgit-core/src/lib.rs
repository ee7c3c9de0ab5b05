//! Ledgit Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `SyncConfig`, `PendingChanges`, `SyncOutcome`, `Notification`
//! - **Sync lifecycle** - `SyncPhase`, `SyncEvent`, and the pure `transition` function
//! - **Port definitions** - Traits for adapters: `IStorage`, `IRemoteSync`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement. The stores and
//! the sync actor live in separate crates and orchestrate domain entities
//! through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
