//! RocksDB-backed store for Scheelite.
//!
//! RocksDB supplies the WAL-backed crash consistency and byte-ordered
//! iteration the scheduling layer's range queries rely on; this crate only
//! adapts it to the [`Store`] contract.

use std::path::Path;

use rocksdb::{DB, Direction, IteratorMode, Options};
use scheelite_core::{ScanRange, Store};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("RocksDB error: {0}")]
pub struct RocksError(#[from] rocksdb::Error);

/// A persistent ordered store backed by RocksDB.
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    /// Opens a RocksDB store at the given path.
    ///
    /// Creates the database if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RocksError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }
}

impl Store for RocksStore {
    type Error = RocksError;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.db.get(key)?)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        self.db.put(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), Self::Error> {
        self.db.delete(key)?;
        Ok(())
    }

    fn scan(&self, range: &ScanRange) -> Result<Vec<(Vec<u8>, Vec<u8>)>, Self::Error> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let mode = match &range.gte {
            Some(gte) => IteratorMode::From(gte, Direction::Forward),
            None => IteratorMode::Start,
        };
        let mut pairs = Vec::new();
        for item in self.db.iterator(mode) {
            let (key, value) = item?;
            if let Some(lt) = &range.lt {
                if key.as_ref() >= lt.as_slice() {
                    break;
                }
            }
            pairs.push((key.to_vec(), value.to_vec()));
        }
        Ok(pairs)
    }
}
