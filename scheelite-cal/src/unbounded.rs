use std::collections::BTreeMap;

use scheelite_core::{AsyncStore, ScanRange};
use uuid::Uuid;

use crate::codec;
use crate::error::{Result, ScheduleError};
use crate::event::UnboundedEvent;

/// CRUD over date-unbounded definitions, keyed by an opaque UUID.
///
/// These records are never range-scanned by time — queries do a full scan
/// and hand every record to the expander — so the keys carry no temporal
/// ordering.
pub struct UnboundedEventDb<S> {
    store: S,
}

impl<S: AsyncStore> UnboundedEventDb<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Inserts a definition under a freshly generated id and returns it.
    pub async fn insert(&self, event: &UnboundedEvent) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.put(&id, event).await?;
        Ok(id)
    }

    /// Stores a definition at an exact id, replacing any existing record.
    pub async fn put(&self, id: &str, event: &UnboundedEvent) -> Result<()> {
        let value = codec::encode(event)?;
        self.store
            .async_put(id.as_bytes(), &value)
            .await
            .map_err(ScheduleError::store)?;
        tracing::debug!(id, name = %event.name(), "stored unbounded definition");
        Ok(())
    }

    /// Looks up one definition. Absence is `Ok(None)`.
    pub async fn get(&self, id: &str) -> Result<Option<UnboundedEvent>> {
        let bytes = self
            .store
            .async_get(id.as_bytes())
            .await
            .map_err(ScheduleError::store)?;
        match bytes {
            Some(bytes) => Ok(Some(codec::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Returns every stored definition, keyed by id.
    pub async fn scan_all(&self) -> Result<BTreeMap<String, UnboundedEvent>> {
        let pairs = self
            .store
            .async_scan(&ScanRange::all())
            .await
            .map_err(ScheduleError::store)?;
        let mut events = BTreeMap::new();
        for (id, value) in pairs {
            let id = String::from_utf8_lossy(&id).into_owned();
            events.insert(id, codec::decode(&value)?);
        }
        Ok(events)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .async_delete(id.as_bytes())
            .await
            .map_err(ScheduleError::store)?;
        tracing::debug!(id, "deleted unbounded definition");
        Ok(())
    }

    /// Replaces the definition at `id`, keeping the id itself.
    pub async fn update(&self, id: &str, event: &UnboundedEvent) -> Result<()> {
        self.delete(id).await?;
        self.put(id, event).await
    }
}
