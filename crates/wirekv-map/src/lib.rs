//! WireKV Map — HashMap-Style Adapter for a Remote Keyspace
//!
//! Implements the standard associative-container contract (get, insert,
//! remove, bulk insert, membership, size, key/value/pair iteration) over
//! one logical database of a wirekv store, so calling code can treat the
//! network-backed keyspace like a local mutable map.
//!
//! The adapter owns no data and keeps no cache: every operation acquires a
//! scoped connection from a [`ConnectionProvider`], selects the configured
//! database, round-trips its commands, and releases the connection when it
//! drops.
//!
//! [`ConnectionProvider`]: wirekv_store::ConnectionProvider
//!
//! # Example
//!
//! ```
//! use wirekv_map::KvMap;
//! use wirekv_store::{MemoryStore, StoreConfig, StorePool};
//!
//! # fn main() -> Result<(), wirekv_map::MapError> {
//! let store = MemoryStore::new(StoreConfig::default());
//! let map = KvMap::new(StorePool::new(store), 1);
//!
//! assert_eq!(map.insert("greeting", "hello")?, None);
//! assert_eq!(map.get("greeting")?, Some("hello".to_owned()));
//! assert_eq!(map.remove("greeting")?, Some("hello".to_owned()));
//! assert!(map.is_empty()?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod map;

pub use error::{MapError, MapResult};
pub use map::KvMap;
