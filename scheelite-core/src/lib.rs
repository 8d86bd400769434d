//! Scheelite core: ordered key-value storage primitives for the
//! scheduling layer.
//!
//! Core concepts:
//! - **Instant**: a millisecond-resolution, timezone-naive point in time
//! - **TimeKey**: a fixed-width, order-preserving binary key derived from
//!   an instant, used as the store's sort key
//! - **Store**: the minimal contract an embedded ordered key-value store
//!   must provide (get/put/delete/range-scan)
//! - **MemoryStore**: an in-memory reference implementation of the contract
//! - **AsyncStore**: the async mirror of `Store`; every sync store is one
//!
//! This crate knows nothing about schedules. The domain layer lives in
//! `scheelite-cal`; persistent backends (RocksDB) in `scheelite-rocks`.

mod async_store;
mod instant;
mod key;
mod store;

pub use async_store::AsyncStore;
pub use instant::{DATE_FORMAT, DATETIME_FORMAT, Instant, MILLISECOND_FORMAT, TimeError};
pub use key::{KeyError, TimeKey};
pub use store::{MemoryStore, ScanRange, Store};
