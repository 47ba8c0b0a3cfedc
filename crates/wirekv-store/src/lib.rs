//! WireKV Store — Multi-Keyspace Key-Value Store Surface
//!
//! The store-facing half of WireKV: the command surface a backing
//! key-value store must expose, the connection-provider seam the adapter
//! layer consumes, and an in-memory engine that stands in for the remote
//! store.
//!
//! # Architecture
//!
//! - **Command surface**: [`StoreConnection`] — single-key get/set/delete/
//!   exists, pattern key enumeration, keyspace count, bulk multi-set,
//!   per-keyspace flush
//! - **Provider seam**: [`ConnectionProvider`] hands out one scoped
//!   connection per operation; dropping it releases it on every exit path
//! - **Engine**: [`MemoryStore`] — numbered keyspaces behind an RwLock,
//!   per-command atomicity and nothing more
//! - **Pool**: [`StorePool`] — bounded, blocking acquisition with timeout
//!
//! Any store exposing this primitive set can back the adapter layer; the
//! in-memory engine is the reference implementation and the test backend.

pub mod config;
pub mod conn;
pub mod error;
pub mod memory;
pub mod pattern;
pub mod pool;

// Re-export key types for convenience
pub use config::StoreConfig;
pub use conn::{ConnectionProvider, DbIndex, StoreConnection};
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryConn, MemoryStore};
pub use pool::{PooledConn, StorePool};
