use std::future::Future;

use crate::store::{ScanRange, Store};

/// Async key-value store contract.
///
/// Mirrors the [`Store`] trait but with async methods, so the scheduling
/// layer can treat every store operation as non-blocking I/O. Methods are
/// prefixed with `async_` to avoid name collisions when a type implements
/// both `Store` and `AsyncStore`.
pub trait AsyncStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn async_get(
        &self,
        key: &[u8],
    ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send;

    fn async_put(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn async_delete(
        &self,
        key: &[u8],
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn async_scan(
        &self,
        range: &ScanRange,
    ) -> impl Future<Output = Result<Vec<(Vec<u8>, Vec<u8>)>, Self::Error>> + Send;
}

/// Blanket impl: any sync `Store` is also an `AsyncStore`.
impl<S: Store + Send + Sync> AsyncStore for S {
    type Error = S::Error;

    async fn async_get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error> {
        self.get(key)
    }

    async fn async_put(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        self.put(key, value)
    }

    async fn async_delete(&self, key: &[u8]) -> Result<(), Self::Error> {
        self.delete(key)
    }

    async fn async_scan(
        &self,
        range: &ScanRange,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, Self::Error> {
        self.scan(range)
    }
}
