//! In-memory store engine — the in-process stand-in for the remote store.
//!
//! `MemoryStore` reproduces the command surface of a multi-keyspace
//! key-value store: numbered logical databases, per-command atomicity,
//! pattern-based key enumeration, one bulk multi-set, a per-keyspace wipe.
//! Adapter tests and local development run against it, since the transport
//! to a real store lives outside this workspace.
//!
//! All connections share the store's state through an `Arc`; multiple
//! readers proceed concurrently via RwLock, writers serialize per command.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::StoreConfig;
use crate::conn::{ConnectionProvider, DbIndex, StoreConnection};
use crate::error::{StoreError, StoreResult};
use crate::pattern::glob_match;

/// Shared store state: one hash table per logical database.
struct Shared {
    databases: RwLock<Vec<HashMap<String, String>>>,
    closed: AtomicBool,
    config: StoreConfig,
}

impl Shared {
    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::unavailable("store is closed"));
        }
        Ok(())
    }
}

/// In-memory multi-keyspace store.
///
/// Cloning is cheap and every clone addresses the same keyspaces. The
/// store holds authoritative state only — connections and adapters built
/// on top of it keep nothing that could fall out of sync.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    /// Create a store with the given configuration.
    pub fn new(config: StoreConfig) -> Self {
        let databases = (0..config.databases).map(|_| HashMap::new()).collect();
        Self {
            shared: Arc::new(Shared {
                databases: RwLock::new(databases),
                closed: AtomicBool::new(false),
                config,
            }),
        }
    }

    /// The configuration this store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }

    /// Open a connection with database 0 selected.
    pub fn connect(&self) -> StoreResult<MemoryConn> {
        self.shared.ensure_open()?;
        Ok(MemoryConn {
            shared: Arc::clone(&self.shared),
            selected: 0,
        })
    }

    /// Mark the store unreachable.
    ///
    /// Every subsequent command and acquisition fails with
    /// [`Unavailable`](StoreError::Unavailable), including on connections
    /// handed out earlier. Idempotent.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
        debug!("store closed");
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let databases = self.shared.databases.read();
        let entries: usize = databases.iter().map(|db| db.len()).sum();
        f.debug_struct("MemoryStore")
            .field("databases", &databases.len())
            .field("entries", &entries)
            .finish()
    }
}

impl ConnectionProvider for MemoryStore {
    type Conn = MemoryConn;

    fn acquire(&self) -> StoreResult<MemoryConn> {
        self.connect()
    }
}

/// A connection to a [`MemoryStore`], carrying its selected keyspace index.
pub struct MemoryConn {
    shared: Arc<Shared>,
    selected: DbIndex,
}

impl MemoryConn {
    fn with_db<R>(&self, f: impl FnOnce(&HashMap<String, String>) -> R) -> StoreResult<R> {
        self.shared.ensure_open()?;
        let databases = self.shared.databases.read();
        Ok(f(&databases[self.selected as usize]))
    }

    fn with_db_mut<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> StoreResult<R> {
        self.shared.ensure_open()?;
        let mut databases = self.shared.databases.write();
        Ok(f(&mut databases[self.selected as usize]))
    }
}

impl StoreConnection for MemoryConn {
    fn select(&mut self, db: DbIndex) -> StoreResult<()> {
        self.shared.ensure_open()?;
        let databases = self.shared.config.databases;
        if db >= databases {
            return Err(StoreError::DbOutOfRange { index: db, databases });
        }
        self.selected = db;
        Ok(())
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        self.with_db(|db| db.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.with_db_mut(|db| {
            db.insert(key.to_owned(), value.to_owned());
        })
    }

    fn delete(&mut self, key: &str) -> StoreResult<bool> {
        self.with_db_mut(|db| db.remove(key).is_some())
    }

    fn exists(&mut self, key: &str) -> StoreResult<bool> {
        self.with_db(|db| db.contains_key(key))
    }

    fn keys(&mut self, pattern: &str) -> StoreResult<Vec<String>> {
        self.with_db(|db| {
            db.keys()
                .filter(|key| glob_match(pattern, key))
                .cloned()
                .collect()
        })
    }

    fn db_size(&mut self) -> StoreResult<u64> {
        self.with_db(|db| db.len() as u64)
    }

    fn multi_set(&mut self, pairs: &[(String, String)]) -> StoreResult<()> {
        self.with_db_mut(|db| {
            for (key, value) in pairs {
                db.insert(key.clone(), value.clone());
            }
        })
    }

    fn flush_db(&mut self) -> StoreResult<()> {
        let flushed = self.with_db_mut(|db| {
            let entries = db.len();
            db.clear();
            entries
        })?;
        debug!(db = self.selected, entries = flushed, "flushed keyspace");
        Ok(())
    }
}
