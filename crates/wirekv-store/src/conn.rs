//! Connection traits: the command surface a backing store must expose.
//!
//! `StoreConnection` is the minimum primitive set the adapter layer needs —
//! single-key reads and writes, existence checks, pattern enumeration, a
//! keyspace count, one bulk multi-set, and a keyspace wipe. Any key-value
//! engine exposing these primitives can sit behind a `ConnectionProvider`.
//!
//! Connections are scoped resources: a provider hands one out per
//! operation, and dropping it releases it unconditionally — on success and
//! on every error path alike. Release never fails.

use crate::error::StoreResult;

/// Logical database index selecting one keyspace inside a store instance.
pub type DbIndex = u16;

/// A live connection to the store, addressing one selected keyspace.
///
/// Commands take `&mut self`: a connection is used by one operation at a
/// time, and the selected database is connection-local state. Each command
/// is a single round trip with per-command atomicity only — there is no
/// cross-command isolation.
pub trait StoreConnection {
    /// Select the logical database subsequent commands address.
    ///
    /// Fails with [`DbOutOfRange`](crate::StoreError::DbOutOfRange) when
    /// the store has no such database.
    fn select(&mut self, db: DbIndex) -> StoreResult<()>;

    /// Fetch the value for `key`. `None` when the key is absent.
    fn get(&mut self, key: &str) -> StoreResult<Option<String>>;

    /// Set `key` to `value`, overwriting any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Returns `false` when the key was already absent.
    /// Idempotent.
    fn delete(&mut self, key: &str) -> StoreResult<bool>;

    /// Whether `key` is present.
    fn exists(&mut self, key: &str) -> StoreResult<bool>;

    /// All keys in the selected keyspace matching `pattern`.
    ///
    /// Pattern syntax is the glob subset of [`pattern`](crate::pattern):
    /// `*` and `?`. Order is not significant.
    fn keys(&mut self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Entry count of the selected keyspace.
    fn db_size(&mut self) -> StoreResult<u64>;

    /// Set every pair in one bulk command.
    ///
    /// All pairs become visible as of the command's completion. No
    /// atomicity is promised beyond what the single command provides, and
    /// there is no per-pair success reporting.
    fn multi_set(&mut self, pairs: &[(String, String)]) -> StoreResult<()>;

    /// Delete every key in the selected keyspace. Other keyspaces in the
    /// same store are untouched.
    fn flush_db(&mut self) -> StoreResult<()>;
}

/// Hands out scoped connections to a store.
///
/// `acquire` may block (a bounded pool waits for a free slot) and may fail
/// with [`PoolExhausted`](crate::StoreError::PoolExhausted) or
/// [`Unavailable`](crate::StoreError::Unavailable). The returned connection
/// is released by dropping it.
pub trait ConnectionProvider {
    /// Connection type this provider hands out.
    type Conn: StoreConnection;

    /// Acquire one connection.
    fn acquire(&self) -> StoreResult<Self::Conn>;
}
