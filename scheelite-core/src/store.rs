use std::collections::BTreeMap;
use std::convert::Infallible;
use std::ops::Bound;
use std::sync::RwLock;

/// A byte-key range for ordered scans: half-open `[gte, lt)`.
///
/// A `None` bound is unbounded on that side.
#[derive(Debug, Clone, Default)]
pub struct ScanRange {
    pub gte: Option<Vec<u8>>,
    pub lt: Option<Vec<u8>>,
}

impl ScanRange {
    /// The unbounded range covering every key.
    pub fn all() -> Self {
        ScanRange::default()
    }

    /// Every key at or after `gte`.
    pub fn at_least(gte: Vec<u8>) -> Self {
        ScanRange {
            gte: Some(gte),
            lt: None,
        }
    }

    /// Keys in `[gte, lt)`.
    pub fn between(gte: Vec<u8>, lt: Vec<u8>) -> Self {
        ScanRange {
            gte: Some(gte),
            lt: Some(lt),
        }
    }

    /// True when the bounds can match no key at all.
    pub fn is_empty(&self) -> bool {
        match (&self.gte, &self.lt) {
            (Some(gte), Some(lt)) => gte >= lt,
            _ => false,
        }
    }
}

/// The minimal contract an embedded ordered key-value store must provide.
///
/// Stores operate on raw bytes; record serialization is handled by higher
/// layers. Keys are ordered byte-lexicographically, which is what makes
/// [`TimeKey`](crate::TimeKey)-keyed range scans temporal range queries.
///
/// All methods take `&self` to support stores with internal locking
/// (e.g., RocksDB). The store is assumed to provide its own crash
/// consistency; this layer adds none.
pub trait Store {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves the bytes associated with a key, or None if not present.
    ///
    /// Absence is `Ok(None)`; an `Err` always means the store itself
    /// failed. The two must never be conflated.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Stores bytes at the given key, replacing any existing value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error>;

    /// Removes a key. Removing an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), Self::Error>;

    /// Returns the `(key, value)` pairs in `range`, ordered by key.
    fn scan(&self, range: &ScanRange) -> Result<Vec<(Vec<u8>, Vec<u8>)>, Self::Error>;
}

/// An in-memory store backed by a `BTreeMap`.
///
/// Useful for testing and as a reference implementation of the contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), Self::Error> {
        self.data.write().unwrap().remove(key);
        Ok(())
    }

    fn scan(&self, range: &ScanRange) -> Result<Vec<(Vec<u8>, Vec<u8>)>, Self::Error> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let lower = match &range.gte {
            Some(gte) => Bound::Included(gte.clone()),
            None => Bound::Unbounded,
        };
        let upper = match &range.lt {
            Some(lt) => Bound::Excluded(lt.clone()),
            None => Bound::Unbounded,
        };
        let data = self.data.read().unwrap();
        Ok(data
            .range((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
