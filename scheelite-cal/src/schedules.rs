use std::collections::HashSet;

use chrono::NaiveDate;
use scheelite_core::{AsyncStore, Instant, TimeKey};

use crate::error::{Result, ScheduleError};
use crate::event::{MappedSchedule, Source, UnboundedEvent};
use crate::expand::{expand_all_day, expand_recurring, expand_system};
use crate::recurring::RecurringEventDb;
use crate::single::SingleEventDb;
use crate::unbounded::UnboundedEventDb;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Aggregates the three schedule stores into one merged query surface.
///
/// The stores are constructed by the caller and injected here; the
/// aggregator holds no other state and no store is shared implicitly.
pub struct Schedules<S> {
    singles: SingleEventDb<S>,
    recurring: RecurringEventDb<S>,
    unbounded: UnboundedEventDb<S>,
}

impl<S: AsyncStore> Schedules<S> {
    pub fn new(
        singles: SingleEventDb<S>,
        recurring: RecurringEventDb<S>,
        unbounded: UnboundedEventDb<S>,
    ) -> Self {
        Self {
            singles,
            recurring,
            unbounded,
        }
    }

    pub fn singles(&self) -> &SingleEventDb<S> {
        &self.singles
    }

    pub fn recurring(&self) -> &RecurringEventDb<S> {
        &self.recurring
    }

    pub fn unbounded(&self) -> &UnboundedEventDb<S> {
        &self.unbounded
    }

    /// All events of all three categories active in `[start, end]`, both
    /// bounds inclusive at the calendar-day level.
    ///
    /// The three per-category lookups run concurrently and the call waits
    /// for all of them; the first failure aborts the whole query with no
    /// partial result.
    pub async fn get_schedules(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashSet<MappedSchedule>> {
        let lo = TimeKey::encode(Instant::from(start));
        // Inclusive end day: the key window runs to the following midnight.
        let hi = TimeKey::encode(Instant::from_millis(
            Instant::from(end).epoch_millis() + DAY_MS,
        ));

        let (singles, recurring, unbounded) = tokio::try_join!(
            self.mapped_singles(lo, hi),
            self.mapped_recurring(lo, hi, start, end),
            self.mapped_unbounded(start, end),
        )?;

        let mut combined = singles;
        combined.extend(recurring);
        combined.extend(unbounded);
        tracing::debug!(
            start = %start,
            end = %end,
            count = combined.len(),
            "combined schedules"
        );
        Ok(combined)
    }

    /// Convenience query for the current local day.
    pub async fn get_todays_schedules(&self) -> Result<HashSet<MappedSchedule>> {
        let today = chrono::Local::now().date_naive();
        self.get_schedules(today, today).await
    }

    async fn mapped_singles(&self, lo: TimeKey, hi: TimeKey) -> Result<HashSet<MappedSchedule>> {
        let events = self
            .singles
            .scan(Some(lo), Some(hi))
            .await
            .map_err(ScheduleError::aggregation(Source::Single))?;
        Ok(events
            .into_iter()
            .map(|(key, event)| MappedSchedule {
                key: key.decoded_text(),
                name: event.name,
                kind: event.kind,
                start: event.start,
                end: event.end,
                source: Source::Single,
            })
            .collect())
    }

    async fn mapped_recurring(
        &self,
        lo: TimeKey,
        hi: TimeKey,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashSet<MappedSchedule>> {
        let defs = self
            .recurring
            .scan(Some(lo), Some(hi))
            .await
            .map_err(ScheduleError::aggregation(Source::Recurring))?;
        let mut occurrences = HashSet::new();
        for (key, def) in &defs {
            occurrences.extend(expand_recurring(start, end, &key.decoded_text(), def));
        }
        Ok(occurrences)
    }

    async fn mapped_unbounded(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashSet<MappedSchedule>> {
        let records = self
            .unbounded
            .scan_all()
            .await
            .map_err(ScheduleError::aggregation(Source::Unbounded))?;
        let mut occurrences = HashSet::new();
        for (id, record) in &records {
            match record {
                UnboundedEvent::System(def) => {
                    occurrences.extend(expand_system(start, end, id, def));
                }
                UnboundedEvent::AllDay(def) => {
                    occurrences.extend(expand_all_day(start, end, id, def));
                }
            }
        }
        Ok(occurrences)
    }
}
