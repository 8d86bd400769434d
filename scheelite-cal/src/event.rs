use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use scheelite_core::Instant;
use serde::{Deserialize, Serialize};

use crate::mask::WeekdayMask;

/// Which store a query result came from.
///
/// The category is structural: it is derived from the store a record lives
/// in and stamped onto [`MappedSchedule`]s during projection, never
/// persisted with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Single,
    Recurring,
    Unbounded,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Single => "single",
            Source::Recurring => "recurring",
            Source::Unbounded => "unbounded",
        };
        f.write_str(name)
    }
}

/// A one-off event with explicit start and end instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleEvent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start: Instant,
    pub end: Instant,
}

/// A weekly-recurring definition bounded by a date range.
///
/// Active on a calendar day `d` iff `start_date <= d <= end_date` and
/// `d`'s weekday bit is set in `days`. Stored keyed by the instant
/// `start_date + start_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub days: WeekdayMask,
}

impl RecurringEvent {
    /// The definition's start bound as an instant (`start_date` at
    /// `start_time`); this is what the storage key is derived from.
    pub fn start_instant(&self) -> Instant {
        self.start_date.and_time(self.start_time).into()
    }

    /// The definition's end bound as an instant (`end_date` at `end_time`).
    pub fn end_instant(&self) -> Instant {
        self.end_date.and_time(self.end_time).into()
    }
}

/// A weekly-recurring-forever definition: no date bound, every day whose
/// weekday bit is set produces an occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemEvent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub days: WeekdayMask,
}

/// A single all-day event, recurring yearly on its month and day-of-month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllDayEvent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub event_date: NaiveDate,
}

/// A record in the unbounded store: one of the two date-unbounded shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum UnboundedEvent {
    System(SystemEvent),
    AllDay(AllDayEvent),
}

impl UnboundedEvent {
    pub fn name(&self) -> &str {
        match self {
            UnboundedEvent::System(event) => &event.name,
            UnboundedEvent::AllDay(event) => &event.name,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            UnboundedEvent::System(event) => &event.kind,
            UnboundedEvent::AllDay(event) => &event.kind,
        }
    }
}

/// The uniform projection every category is mapped into for a query
/// window. Ephemeral: constructed per query, never persisted.
///
/// Equality and hashing cover every field, so overlapping occurrences from
/// different categories only collapse when genuinely identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappedSchedule {
    /// Canonical decoded text of the storage key for time-keyed
    /// categories; the UUID string for unbounded ones.
    pub key: String,
    pub name: String,
    pub kind: String,
    pub start: Instant,
    pub end: Instant,
    pub source: Source,
}
