//! `KvMap`: the associative-container adapter over a remote keyspace.
//!
//! Every operation follows the same protocol: acquire one connection from
//! the provider, select the configured logical database, issue the
//! command(s), translate the result into container vocabulary, and release
//! the connection when it drops — on success and on every error path
//! alike.

use std::collections::HashSet;

use tracing::debug;

use wirekv_store::{ConnectionProvider, DbIndex, StoreConnection};

use crate::error::{MapError, MapResult};

/// A `HashMap`-style view of one logical database in a remote store.
///
/// The map owns no data. Every read reflects the store's state at the
/// moment of the call and every write is a live round trip; there is no
/// client-side cache or index to fall out of sync. The price is that
/// whole-collection operations ([`contains_value`](Self::contains_value),
/// [`values`](Self::values), [`entries`](Self::entries)) scan the entire
/// keyspace.
///
/// # Concurrency
///
/// The adapter holds no mutable state, so sharing it across threads is
/// safe; ordering between concurrent callers is whatever the store grants
/// concurrent commands. The read-then-write operations
/// ([`insert`](Self::insert), [`remove`](Self::remove)) are not atomic as a unit: a
/// concurrent writer can slip between the two commands, and the returned
/// previous value then reflects the read, not the value actually
/// overwritten. The command surface has no set-and-return-old primitive,
/// so the gap is documented rather than hidden.
///
/// # Failures
///
/// No operation retries internally; a store failure surfaces to the caller
/// unmodified. An absent key is never a failure.
pub struct KvMap<P: ConnectionProvider> {
    provider: P,
    db: DbIndex,
}

impl<P: ConnectionProvider> KvMap<P> {
    /// Create an adapter addressing logical database `db` through
    /// `provider`. The database index is fixed for the adapter's lifetime.
    pub fn new(provider: P, db: DbIndex) -> Self {
        Self { provider, db }
    }

    /// The logical database this map addresses.
    pub fn db(&self) -> DbIndex {
        self.db
    }

    /// Acquire a connection with this map's database selected.
    fn conn(&self) -> MapResult<P::Conn> {
        let mut conn = self.provider.acquire()?;
        conn.select(self.db)?;
        Ok(conn)
    }

    /// Number of entries in the keyspace.
    ///
    /// Fails with [`CountOverflow`](MapError::CountOverflow) if the store
    /// reports more entries than `usize` can hold.
    pub fn len(&self) -> MapResult<usize> {
        let count = self.conn()?.db_size()?;
        usize::try_from(count).map_err(|_| MapError::CountOverflow { count })
    }

    /// `true` if the keyspace has no entries.
    ///
    /// One round trip against the same count primitive as
    /// [`len`](Self::len).
    pub fn is_empty(&self) -> MapResult<bool> {
        Ok(self.conn()?.db_size()? == 0)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> MapResult<bool> {
        Ok(self.conn()?.exists(key)?)
    }

    /// Whether any key maps to `value`.
    ///
    /// O(N) over the keyspace: enumerates every key and fetches each value
    /// until one matches. Acceptable for small keyspaces; anything larger
    /// wants a reverse index maintained alongside writes instead.
    pub fn contains_value(&self, value: &str) -> MapResult<bool> {
        let mut conn = self.conn()?;
        for key in conn.keys("*")? {
            if let Some(candidate) = conn.get(&key)? {
                if candidate == value {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// The value for `key`, or `None` when absent.
    pub fn get(&self, key: &str) -> MapResult<Option<String>> {
        Ok(self.conn()?.get(key)?)
    }

    /// Insert or overwrite `key`, returning the value it previously held.
    ///
    /// Two commands on one connection: fetch the current value, then set.
    /// See the type-level docs for what a concurrent writer between the
    /// two means for the returned value.
    pub fn insert(&self, key: &str, value: &str) -> MapResult<Option<String>> {
        let mut conn = self.conn()?;
        let previous = conn.get(key)?;
        conn.set(key, value)?;
        Ok(previous)
    }

    /// Remove `key`, returning the value it held.
    ///
    /// Removing an absent key is a no-op that returns `None`.
    pub fn remove(&self, key: &str) -> MapResult<Option<String>> {
        let mut conn = self.conn()?;
        let previous = conn.get(key)?;
        conn.delete(key)?;
        Ok(previous)
    }

    /// Insert every pair in one bulk command.
    ///
    /// Empty input is a no-op that never touches the store. All pairs
    /// become visible as of the single command's completion; there is no
    /// per-pair reporting — the command round-trips as a whole or the
    /// operation fails as a whole.
    pub fn extend<I>(&self, entries: I) -> MapResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let pairs: Vec<(String, String)> = entries.into_iter().collect();
        if pairs.is_empty() {
            return Ok(());
        }
        debug!(db = self.db, pairs = pairs.len(), "bulk insert");
        self.conn()?.multi_set(&pairs)?;
        Ok(())
    }

    /// Delete every key in this map's logical database.
    ///
    /// Other logical databases in the same store are untouched.
    pub fn clear(&self) -> MapResult<()> {
        debug!(db = self.db, "clearing keyspace");
        self.conn()?.flush_db()?;
        Ok(())
    }

    /// All current keys.
    ///
    /// A snapshot taken at scan time; it can be stale by the time the
    /// caller reads it.
    pub fn keys(&self) -> MapResult<HashSet<String>> {
        Ok(self.conn()?.keys("*")?.into_iter().collect())
    }

    /// All current values, duplicates preserved.
    ///
    /// Full key scan plus one fetch per key. A key that vanishes between
    /// the scan and its fetch is skipped — the entry no longer exists.
    pub fn values(&self) -> MapResult<Vec<String>> {
        let mut conn = self.conn()?;
        let keys = conn.keys("*")?;
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = conn.get(&key)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// All current key-value pairs.
    ///
    /// Same scan-then-fetch protocol as [`values`](Self::values). Keys are
    /// unique in the keyspace, so each pair is distinct.
    pub fn entries(&self) -> MapResult<HashSet<(String, String)>> {
        let mut conn = self.conn()?;
        let keys = conn.keys("*")?;
        let mut entries = HashSet::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = conn.get(&key)? {
                entries.insert((key, value));
            }
        }
        Ok(entries)
    }
}

impl<P: ConnectionProvider> std::fmt::Debug for KvMap<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvMap").field("db", &self.db).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirekv_store::{MemoryStore, StoreConfig};

    fn test_map() -> KvMap<MemoryStore> {
        KvMap::new(MemoryStore::new(StoreConfig::default()), 0)
    }

    #[test]
    fn test_insert_returns_previous() {
        let map = test_map();
        assert_eq!(map.insert("k", "v1").unwrap(), None);
        assert_eq!(map.insert("k", "v2").unwrap(), Some("v1".to_owned()));
        assert_eq!(map.get("k").unwrap(), Some("v2".to_owned()));
    }

    #[test]
    fn test_remove_returns_previous() {
        let map = test_map();
        map.insert("k", "v").unwrap();
        assert_eq!(map.remove("k").unwrap(), Some("v".to_owned()));
        assert_eq!(map.remove("k").unwrap(), None);
        assert!(!map.contains_key("k").unwrap());
    }

    #[test]
    fn test_len_and_is_empty_agree() {
        let map = test_map();
        assert!(map.is_empty().unwrap());
        assert_eq!(map.len().unwrap(), 0);

        map.insert("k", "v").unwrap();
        assert!(!map.is_empty().unwrap());
        assert_eq!(map.len().unwrap(), 1);
    }

    #[test]
    fn test_contains_value_short_circuits_on_match() {
        let map = test_map();
        map.insert("a", "alpha").unwrap();
        map.insert("b", "beta").unwrap();
        assert!(map.contains_value("beta").unwrap());
        assert!(!map.contains_value("gamma").unwrap());
    }

    #[test]
    fn test_extend_empty_is_noop() {
        let map = test_map();
        map.insert("k", "v").unwrap();
        map.extend(std::iter::empty::<(String, String)>()).unwrap();
        assert_eq!(map.len().unwrap(), 1);
    }

    #[test]
    fn test_debug_omits_data() {
        let map = test_map();
        map.insert("secret", "value").unwrap();
        let debug_str = format!("{:?}", map);
        assert!(debug_str.contains("KvMap"));
        assert!(!debug_str.contains("secret"));
    }
}
