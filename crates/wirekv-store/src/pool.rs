//! Bounded connection pool over a [`MemoryStore`].
//!
//! `acquire` blocks until a connection slot frees up and fails with
//! [`PoolExhausted`](crate::StoreError::PoolExhausted) once the configured
//! timeout elapses. A handed-out connection returns its slot when dropped —
//! release runs on every exit path and never fails.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};
use tracing::warn;

use crate::conn::{ConnectionProvider, DbIndex, StoreConnection};
use crate::error::{StoreError, StoreResult};
use crate::memory::{MemoryConn, MemoryStore};

/// Slot accounting shared between the pool and its live connections.
struct Slots {
    in_use: Mutex<usize>,
    freed: Condvar,
    max: usize,
}

impl Slots {
    fn release(&self) {
        let mut in_use = self.in_use.lock();
        *in_use = in_use.saturating_sub(1);
        self.freed.notify_one();
    }
}

/// Bounded connection provider over a [`MemoryStore`].
///
/// Sized from the store's [`StoreConfig`](crate::StoreConfig): at most
/// `max_connections` connections out at once, `acquire_timeout` of
/// blocking before acquisition gives up.
#[derive(Clone)]
pub struct StorePool {
    store: MemoryStore,
    slots: Arc<Slots>,
}

impl StorePool {
    /// Build a pool over the given store.
    pub fn new(store: MemoryStore) -> Self {
        let max = store.config().max_connections;
        Self {
            slots: Arc::new(Slots {
                in_use: Mutex::new(0),
                freed: Condvar::new(),
                max,
            }),
            store,
        }
    }

    /// Connections currently handed out.
    pub fn in_use(&self) -> usize {
        *self.slots.in_use.lock()
    }
}

impl std::fmt::Debug for StorePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorePool")
            .field("in_use", &self.in_use())
            .field("max", &self.slots.max)
            .finish()
    }
}

impl ConnectionProvider for StorePool {
    type Conn = PooledConn;

    fn acquire(&self) -> StoreResult<PooledConn> {
        let timeout = self.store.config().acquire_timeout;
        let deadline = Instant::now() + timeout;

        let mut in_use = self.slots.in_use.lock();
        while *in_use >= self.slots.max {
            let timed_out = self.slots.freed.wait_until(&mut in_use, deadline).timed_out();
            if timed_out && *in_use >= self.slots.max {
                warn!(max = self.slots.max, ?timeout, "connection pool exhausted");
                return Err(StoreError::PoolExhausted {
                    max: self.slots.max,
                    waited: timeout,
                });
            }
        }
        *in_use += 1;
        drop(in_use);

        match self.store.connect() {
            Ok(conn) => Ok(PooledConn {
                conn,
                slots: Arc::clone(&self.slots),
            }),
            Err(e) => {
                // The slot was claimed but no connection came of it.
                self.slots.release();
                Err(e)
            }
        }
    }
}

/// A pooled connection. Returns its slot when dropped.
pub struct PooledConn {
    conn: MemoryConn,
    slots: Arc<Slots>,
}

impl std::fmt::Debug for PooledConn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConn").finish_non_exhaustive()
    }
}

impl Drop for PooledConn {
    fn drop(&mut self) {
        self.slots.release();
    }
}

impl StoreConnection for PooledConn {
    fn select(&mut self, db: DbIndex) -> StoreResult<()> {
        self.conn.select(db)
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        self.conn.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.set(key, value)
    }

    fn delete(&mut self, key: &str) -> StoreResult<bool> {
        self.conn.delete(key)
    }

    fn exists(&mut self, key: &str) -> StoreResult<bool> {
        self.conn.exists(key)
    }

    fn keys(&mut self, pattern: &str) -> StoreResult<Vec<String>> {
        self.conn.keys(pattern)
    }

    fn db_size(&mut self) -> StoreResult<u64> {
        self.conn.db_size()
    }

    fn multi_set(&mut self, pairs: &[(String, String)]) -> StoreResult<()> {
        self.conn.multi_set(pairs)
    }

    fn flush_db(&mut self) -> StoreResult<()> {
        self.conn.flush_db()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn test_pool() -> StorePool {
        StorePool::new(MemoryStore::new(StoreConfig::minimal()))
    }

    #[test]
    fn test_acquire_and_use() {
        let pool = test_pool();
        let mut conn = pool.acquire().unwrap();
        conn.set("k", "v").unwrap();
        assert_eq!(conn.get("k").unwrap(), Some("v".to_owned()));
        assert_eq!(pool.in_use(), 1);
    }

    #[test]
    fn test_release_on_drop() {
        let pool = test_pool();
        {
            let _a = pool.acquire().unwrap();
            let _b = pool.acquire().unwrap();
            assert_eq!(pool.in_use(), 2);
        }
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn test_exhaustion_times_out() {
        let pool = test_pool();
        let _a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();

        let err = pool.acquire().unwrap_err();
        assert!(matches!(err, StoreError::PoolExhausted { max: 2, .. }));
    }

    #[test]
    fn test_slot_frees_while_waiting() {
        let pool = test_pool();
        let a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();

        let waiter = {
            let pool = pool.clone();
            std::thread::spawn(move || pool.acquire().map(|_| ()))
        };
        std::thread::sleep(std::time::Duration::from_millis(20));
        drop(a);

        waiter.join().unwrap().unwrap();
    }

    #[test]
    fn test_closed_store_releases_slot() {
        let store = MemoryStore::new(StoreConfig::minimal());
        let pool = StorePool::new(store.clone());
        store.close();

        assert!(matches!(pool.acquire(), Err(StoreError::Unavailable { .. })));
        assert_eq!(pool.in_use(), 0);
    }
}
