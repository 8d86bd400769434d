use std::collections::BTreeMap;

use scheelite_core::{AsyncStore, ScanRange, TimeKey};

use crate::codec;
use crate::error::{Result, ScheduleError};
use crate::event::SingleEvent;

/// CRUD over one-off events, keyed by their start instant.
pub struct SingleEventDb<S> {
    store: S,
}

impl<S: AsyncStore> SingleEventDb<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the first free key in `candidate`'s one-minute window.
    ///
    /// If any records exist in `[candidate, candidate + 1 minute)`, the
    /// result is one millisecond past the last of them; otherwise
    /// `candidate` itself. Re-derived on every insert so each insert
    /// observes the ones before it.
    pub async fn next_available_key(&self, candidate: TimeKey) -> Result<TimeKey> {
        let occupied = self.scan(Some(candidate), None).await?;
        Ok(match occupied.keys().next_back() {
            Some(last) => last.next_millisecond(),
            None => candidate,
        })
    }

    /// Inserts an event keyed by its start instant, advancing past any
    /// records already occupying the same one-minute window. Returns the
    /// key the event was stored under.
    ///
    /// Key derivation and the write are separate store operations, so two
    /// concurrent inserts into the same minute can race; a single writer
    /// is assumed.
    pub async fn insert(&self, event: &SingleEvent) -> Result<TimeKey> {
        let candidate = TimeKey::encode(event.start);
        let key = self.next_available_key(candidate).await?;
        self.put(key, event).await
    }

    /// Stores an event at an exact key, replacing any existing record.
    pub async fn put(&self, key: TimeKey, event: &SingleEvent) -> Result<TimeKey> {
        let value = codec::encode(event)?;
        self.store
            .async_put(key.as_bytes(), &value)
            .await
            .map_err(ScheduleError::store)?;
        tracing::debug!(key = %key, name = %event.name, "stored single event");
        Ok(key)
    }

    /// Looks up one event. Absence is `Ok(None)`; a store failure is an
    /// error, never reported as absence.
    pub async fn get(&self, key: TimeKey) -> Result<Option<SingleEvent>> {
        let bytes = self
            .store
            .async_get(key.as_bytes())
            .await
            .map_err(ScheduleError::store)?;
        match bytes {
            Some(bytes) => Ok(Some(codec::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Ordered scan over `[start, end)`.
    ///
    /// A missing `end` defaults to one minute past `start`; a missing
    /// `start` scans the whole store.
    pub async fn scan(
        &self,
        start: Option<TimeKey>,
        end: Option<TimeKey>,
    ) -> Result<BTreeMap<TimeKey, SingleEvent>> {
        let range = match start {
            Some(start) => {
                let end = end.unwrap_or_else(|| start.next_minute());
                ScanRange::between(start.as_bytes().to_vec(), end.as_bytes().to_vec())
            }
            None => ScanRange::all(),
        };
        let pairs = self
            .store
            .async_scan(&range)
            .await
            .map_err(ScheduleError::store)?;
        let mut events = BTreeMap::new();
        for (key, value) in pairs {
            events.insert(TimeKey::from_bytes(&key)?, codec::decode(&value)?);
        }
        Ok(events)
    }

    pub async fn delete(&self, key: TimeKey) -> Result<()> {
        self.store
            .async_delete(key.as_bytes())
            .await
            .map_err(ScheduleError::store)?;
        tracing::debug!(key = %key, "deleted single event");
        Ok(())
    }

    /// Replaces the record at `key`, keeping the key itself: delete then
    /// put, with no re-disambiguation.
    pub async fn update(&self, key: TimeKey, event: &SingleEvent) -> Result<TimeKey> {
        self.delete(key).await?;
        self.put(key, event).await
    }
}
