//! Expansion of recurring and unbounded definitions into concrete
//! occurrences for a query window.
//!
//! Windows are calendar-day ranges, inclusive at both ends. Occurrence
//! sets are unordered; presentation order is the caller's concern.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveTime};
use scheelite_core::Instant;

use crate::event::{AllDayEvent, MappedSchedule, RecurringEvent, Source, SystemEvent};

/// Milliseconds from midnight to `23:59:59.999`.
const DAY_END_OFFSET_MS: i64 = 24 * 60 * 60 * 1000 - 1;

fn window_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Expands a date-bounded recurring definition over `[window_start,
/// window_end]`.
///
/// A day produces an occurrence iff its weekday bit is set in `def.days`
/// and it lies within `[def.start_date, def.end_date]`, both ends
/// inclusive. Occurrences span the day combined with the definition's
/// start and end times.
pub fn expand_recurring(
    window_start: NaiveDate,
    window_end: NaiveDate,
    key: &str,
    def: &RecurringEvent,
) -> HashSet<MappedSchedule> {
    window_days(window_start, window_end)
        .filter(|day| def.days.contains(day.weekday()))
        .filter(|day| def.start_date <= *day && *day <= def.end_date)
        .map(|day| MappedSchedule {
            key: key.to_string(),
            name: def.name.clone(),
            kind: def.kind.clone(),
            start: day.and_time(def.start_time).into(),
            end: day.and_time(def.end_time).into(),
            source: Source::Recurring,
        })
        .collect()
}

/// Expands a weekly-recurring-forever definition over the window: every
/// day matching the weekday mask produces an occurrence, with no date
/// bound.
pub fn expand_system(
    window_start: NaiveDate,
    window_end: NaiveDate,
    id: &str,
    def: &SystemEvent,
) -> HashSet<MappedSchedule> {
    window_days(window_start, window_end)
        .filter(|day| def.days.contains(day.weekday()))
        .map(|day| MappedSchedule {
            key: id.to_string(),
            name: def.name.clone(),
            kind: def.kind.clone(),
            start: day.and_time(def.start_time).into(),
            end: day.and_time(def.end_time).into(),
            source: Source::Unbounded,
        })
        .collect()
}

/// Expands an all-day definition over the window: a day matches when its
/// month and day-of-month equal `def.event_date`'s, regardless of year.
/// Occurrences span `00:00:00.000` to `23:59:59.999`.
pub fn expand_all_day(
    window_start: NaiveDate,
    window_end: NaiveDate,
    id: &str,
    def: &AllDayEvent,
) -> HashSet<MappedSchedule> {
    window_days(window_start, window_end)
        .filter(|day| {
            day.month() == def.event_date.month() && day.day() == def.event_date.day()
        })
        .map(|day| {
            let start = Instant::from(day.and_time(NaiveTime::MIN));
            MappedSchedule {
                key: id.to_string(),
                name: def.name.clone(),
                kind: def.kind.clone(),
                start,
                end: Instant::from_millis(start.epoch_millis() + DAY_END_OFFSET_MS),
                source: Source::Unbounded,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::WeekdayMask;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn october_weekdays() -> RecurringEvent {
        RecurringEvent {
            name: "workday".to_string(),
            kind: "work".to_string(),
            start_date: date(2017, 10, 1),
            end_date: date(2017, 10, 31),
            start_time: time(9, 0),
            end_time: time(17, 0),
            days: WeekdayMask::WEEKDAYS,
        }
    }

    #[test]
    fn recurring_window_outside_range_is_empty() {
        let occurrences =
            expand_recurring(date(2018, 1, 1), date(2018, 1, 31), "k", &october_weekdays());
        assert!(occurrences.is_empty());
    }

    #[test]
    fn recurring_first_week_of_october_2017() {
        // 10/01/2017 is a Sunday, so Mon..Fri are 10/2 through 10/6.
        let occurrences =
            expand_recurring(date(2017, 10, 1), date(2017, 10, 7), "k", &october_weekdays());

        assert_eq!(occurrences.len(), 5);
        let mut starts: Vec<String> =
            occurrences.iter().map(|s| s.start.to_string()).collect();
        starts.sort();
        assert_eq!(
            starts,
            vec![
                "10/02/2017 09:00:00.000 AM",
                "10/03/2017 09:00:00.000 AM",
                "10/04/2017 09:00:00.000 AM",
                "10/05/2017 09:00:00.000 AM",
                "10/06/2017 09:00:00.000 AM",
            ]
        );
        assert!(occurrences.iter().all(|s| s.source == Source::Recurring));
    }

    #[test]
    fn recurring_end_date_day_is_included() {
        // 10/31/2017 is a Tuesday, the definition's last day.
        let occurrences = expand_recurring(
            date(2017, 10, 30),
            date(2017, 11, 5),
            "k",
            &october_weekdays(),
        );

        let mut starts: Vec<String> =
            occurrences.iter().map(|s| s.start.to_string()).collect();
        starts.sort();
        assert_eq!(
            starts,
            vec![
                "10/30/2017 09:00:00.000 AM",
                "10/31/2017 09:00:00.000 AM",
            ]
        );
    }

    #[test]
    fn recurring_respects_weekday_mask() {
        let mut def = october_weekdays();
        def.days = WeekdayMask::TUE | WeekdayMask::THU;

        let occurrences =
            expand_recurring(date(2017, 10, 1), date(2017, 10, 7), "k", &def);

        assert_eq!(occurrences.len(), 2); // 10/3 and 10/5
    }

    #[test]
    fn system_expands_every_matching_day_unbounded() {
        let def = SystemEvent {
            name: "quiet hours".to_string(),
            kind: "system".to_string(),
            start_time: time(22, 0),
            end_time: time(23, 0),
            days: WeekdayMask::WEEKENDS,
        };

        // Two full weekends in 06/01/2195..06/14/2195 — no date bound, any
        // century works.
        let occurrences = expand_system(date(2195, 6, 1), date(2195, 6, 14), "id", &def);

        assert_eq!(occurrences.len(), 4);
        assert!(occurrences.iter().all(|s| s.source == Source::Unbounded));
    }

    #[test]
    fn all_day_matches_month_and_day_across_years() {
        let def = AllDayEvent {
            name: "anniversary".to_string(),
            kind: "allday".to_string(),
            event_date: date(2020, 3, 15),
        };

        let occurrences = expand_all_day(date(2024, 3, 1), date(2024, 3, 31), "id", &def);

        assert_eq!(occurrences.len(), 1);
        let occurrence = occurrences.iter().next().unwrap();
        assert_eq!(occurrence.start.to_string(), "03/15/2024 12:00:00.000 AM");
        assert_eq!(occurrence.end.to_string(), "03/15/2024 11:59:59.999 PM");
    }

    #[test]
    fn all_day_outside_window_is_empty() {
        let def = AllDayEvent {
            name: "anniversary".to_string(),
            kind: "allday".to_string(),
            event_date: date(2020, 3, 15),
        };

        assert!(expand_all_day(date(2024, 4, 1), date(2024, 4, 30), "id", &def).is_empty());
    }
}
