use std::collections::BTreeMap;

use scheelite_core::{AsyncStore, ScanRange, TimeKey};

use crate::codec;
use crate::error::{Result, ScheduleError};
use crate::event::RecurringEvent;

/// CRUD over weekly-recurring, date-range-bounded definitions.
///
/// Definitions are keyed by the instant `start_date + start_time` — the
/// definition's own start, not any expanded occurrence. The one-minute
/// collision window therefore applies to definition starts.
pub struct RecurringEventDb<S> {
    store: S,
}

impl<S: AsyncStore> RecurringEventDb<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the first free key in `candidate`'s one-minute window,
    /// one millisecond past the last occupant when there is one.
    pub async fn next_available_key(&self, candidate: TimeKey) -> Result<TimeKey> {
        let occupied = self.scan(Some(candidate), None).await?;
        Ok(match occupied.keys().next_back() {
            Some(last) => last.next_millisecond(),
            None => candidate,
        })
    }

    /// Inserts a definition keyed by its start instant, advancing past any
    /// definitions already occupying the same one-minute window. Returns
    /// the key the definition was stored under.
    ///
    /// Same scan-then-write race as the single-event store: single writer
    /// assumed.
    pub async fn insert(&self, def: &RecurringEvent) -> Result<TimeKey> {
        let candidate = TimeKey::encode(def.start_instant());
        let key = self.next_available_key(candidate).await?;
        self.put(key, def).await
    }

    /// Stores a definition at an exact key, replacing any existing record.
    ///
    /// Rejects definitions whose date range is inverted.
    pub async fn put(&self, key: TimeKey, def: &RecurringEvent) -> Result<TimeKey> {
        if def.end_date < def.start_date {
            return Err(ScheduleError::InvalidRange {
                start: def.start_date,
                end: def.end_date,
            });
        }
        let value = codec::encode(def)?;
        self.store
            .async_put(key.as_bytes(), &value)
            .await
            .map_err(ScheduleError::store)?;
        tracing::debug!(key = %key, name = %def.name, "stored recurring definition");
        Ok(key)
    }

    /// Looks up one definition. Absence is `Ok(None)`.
    pub async fn get(&self, key: TimeKey) -> Result<Option<RecurringEvent>> {
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

    /// Ordered scan over definition keys in `[start, end)`.
    ///
    /// A missing `end` defaults to one minute past `start`; a missing
    /// `start` scans the whole store.
    pub async fn scan(
        &self,
        start: Option<TimeKey>,
        end: Option<TimeKey>,
    ) -> Result<BTreeMap<TimeKey, RecurringEvent>> {
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
        let mut defs = BTreeMap::new();
        for (key, value) in pairs {
            defs.insert(TimeKey::from_bytes(&key)?, codec::decode(&value)?);
        }
        Ok(defs)
    }

    pub async fn delete(&self, key: TimeKey) -> Result<()> {
        self.store
            .async_delete(key.as_bytes())
            .await
            .map_err(ScheduleError::store)?;
        tracing::debug!(key = %key, "deleted recurring definition");
        Ok(())
    }

    /// Replaces the definition at `key`, keeping the key itself.
    pub async fn update(&self, key: TimeKey, def: &RecurringEvent) -> Result<TimeKey> {
        self.delete(key).await?;
        self.put(key, def).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::WeekdayMask;
    use chrono::{NaiveDate, NaiveTime};
    use scheelite_core::MemoryStore;

    fn weekday_def() -> RecurringEvent {
        RecurringEvent {
            name: "workday".to_string(),
            kind: "work".to_string(),
            start_date: NaiveDate::from_ymd_opt(2017, 10, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2017, 10, 31).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            days: WeekdayMask::WEEKDAYS,
        }
    }

    #[tokio::test]
    async fn key_derives_from_definition_start() {
        let db = RecurringEventDb::new(MemoryStore::new());

        let key = db.insert(&weekday_def()).await.unwrap();

        assert_eq!(key.decoded_text(), "10/01/2017 09:00:00.000 AM");
        assert_eq!(db.get(key).await.unwrap(), Some(weekday_def()));
    }

    #[tokio::test]
    async fn inverted_date_range_is_rejected() {
        let db = RecurringEventDb::new(MemoryStore::new());

        let mut def = weekday_def();
        def.end_date = NaiveDate::from_ymd_opt(2017, 9, 1).unwrap();

        assert!(matches!(
            db.insert(&def).await,
            Err(ScheduleError::InvalidRange { .. })
        ));
    }

    #[tokio::test]
    async fn colliding_definition_starts_disambiguate() {
        let db = RecurringEventDb::new(MemoryStore::new());

        let first = db.insert(&weekday_def()).await.unwrap();
        let second = db.insert(&weekday_def()).await.unwrap();

        assert_eq!(
            second.decode().epoch_millis(),
            first.decode().epoch_millis() + 1
        );
    }

    #[tokio::test]
    async fn update_keeps_the_key() {
        let db = RecurringEventDb::new(MemoryStore::new());

        let key = db.insert(&weekday_def()).await.unwrap();

        let mut def = weekday_def();
        def.days = WeekdayMask::MON | WeekdayMask::WED;
        db.update(key, &def).await.unwrap();

        assert_eq!(db.get(key).await.unwrap(), Some(def));
    }
}
