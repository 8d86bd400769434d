use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Calendar-day display format (`10/05/2017`).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Minute-resolution display format (`10/05/2017 05:00 PM`).
pub const DATETIME_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Canonical millisecond-resolution display format
/// (`10/05/2017 05:00:00.000 PM`).
pub const MILLISECOND_FORMAT: &str = "%m/%d/%Y %I:%M:%S%.3f %p";

/// Error raised when a value cannot be read as a point in time.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// The text matches none of the recognized display formats.
    #[error("not a recognized date-time text: {0:?}")]
    Unrecognized(String),
}

/// A millisecond-resolution, timezone-naive point in time.
///
/// All times in the scheduling layer are local wall-clock values with no
/// timezone attached. The representation is epoch milliseconds; negative
/// values are instants before 1970.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    /// Creates an instant from raw epoch milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Instant(millis)
    }

    /// Returns the raw epoch milliseconds.
    pub const fn epoch_millis(self) -> i64 {
        self.0
    }

    /// Parses display text, trying the millisecond, minute, then date-only
    /// formats in that order. Date-only text resolves to midnight.
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, MILLISECOND_FORMAT) {
            return Ok(dt.into());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT) {
            return Ok(dt.into());
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
            return Ok(d.into());
        }
        Err(TimeError::Unrecognized(text.to_string()))
    }

    /// Returns the instant as a calendar date-time, or `None` when the raw
    /// milliseconds fall outside chrono's representable range.
    pub fn datetime(self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(self.0).map(|dt| dt.naive_utc())
    }

    /// The instant one millisecond later.
    pub fn next_millisecond(self) -> Self {
        Instant(self.0.saturating_add(1))
    }

    /// The instant exactly one minute later.
    pub fn next_minute(self) -> Self {
        Instant(self.0.saturating_add(60_000))
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(dt: NaiveDateTime) -> Self {
        Instant(dt.and_utc().timestamp_millis())
    }
}

impl From<NaiveDate> for Instant {
    fn from(date: NaiveDate) -> Self {
        date.and_time(NaiveTime::MIN).into()
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.datetime() {
            Some(dt) => write!(f, "{}", dt.format(MILLISECOND_FORMAT)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_millisecond_format() {
        let instant = Instant::parse("10/05/2017 05:00:00.123 PM").unwrap();
        assert_eq!(format!("{}", instant), "10/05/2017 05:00:00.123 PM");
    }

    #[test]
    fn parse_datetime_format() {
        let instant = Instant::parse("10/05/2017 05:00 PM").unwrap();
        assert_eq!(format!("{}", instant), "10/05/2017 05:00:00.000 PM");
    }

    #[test]
    fn parse_date_format_is_midnight() {
        let instant = Instant::parse("10/05/2017").unwrap();
        assert_eq!(format!("{}", instant), "10/05/2017 12:00:00.000 AM");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Instant::parse("next tuesday"),
            Err(TimeError::Unrecognized(_))
        ));
    }

    #[test]
    fn millis_roundtrip() {
        let instant = Instant::parse("10/05/2017 05:00 PM").unwrap();
        assert_eq!(Instant::from_millis(instant.epoch_millis()), instant);
    }

    #[test]
    fn negative_millis_are_pre_1970() {
        let instant = Instant::parse("12/31/1969 11:59 PM").unwrap();
        assert!(instant.epoch_millis() < 0);
        assert_eq!(format!("{}", instant), "12/31/1969 11:59:00.000 PM");
    }

    #[test]
    fn next_millisecond_and_minute() {
        let instant = Instant::from_millis(1_000);
        assert_eq!(instant.next_millisecond().epoch_millis(), 1_001);
        assert_eq!(instant.next_minute().epoch_millis(), 61_000);
    }

    #[test]
    fn ordering_follows_time() {
        let earlier = Instant::parse("10/05/2017 05:00 PM").unwrap();
        let later = Instant::parse("10/05/2017 06:00 PM").unwrap();
        assert!(earlier < later);
    }
}
