//! Durable relay configuration — the single record every dispatched event
//! reads and every setup command mutates.
//!
//! The record lives in one JSON file. Reads and writes are whole-record and
//! atomic from the caller's point of view: a load either yields the full
//! last-committed record or fails, never a partial one. Setup mutations are
//! read-modify-write under one lock acquisition, so a concurrent deployment
//! cannot lose an update between a setup save and an in-flight load.

pub mod store;
pub mod types;

pub use store::{ConfigStore, LinkOutcome, StoreError};
pub use types::RelayConfig;
