use std::fmt;
use std::ops::BitOr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Bit set of the weekdays a recurring definition is active on.
///
/// Bit assignments match the stored representation: Monday is the least
/// significant bit, Sunday the highest.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub const MON: WeekdayMask = WeekdayMask(1);
    pub const TUE: WeekdayMask = WeekdayMask(2);
    pub const WED: WeekdayMask = WeekdayMask(4);
    pub const THU: WeekdayMask = WeekdayMask(8);
    pub const FRI: WeekdayMask = WeekdayMask(16);
    pub const SAT: WeekdayMask = WeekdayMask(32);
    pub const SUN: WeekdayMask = WeekdayMask(64);

    /// Monday through Friday (31).
    pub const WEEKDAYS: WeekdayMask = WeekdayMask(0b001_1111);
    /// Saturday and Sunday (96).
    pub const WEEKENDS: WeekdayMask = WeekdayMask(0b110_0000);

    /// Builds a mask from its raw bits; bits above the seven weekdays are
    /// dropped.
    pub const fn from_bits(bits: u8) -> Self {
        WeekdayMask(bits & 0x7f)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when no weekday is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when `day`'s bit is set.
    pub fn contains(self, day: Weekday) -> bool {
        let bit = match day {
            Weekday::Mon => Self::MON,
            Weekday::Tue => Self::TUE,
            Weekday::Wed => Self::WED,
            Weekday::Thu => Self::THU,
            Weekday::Fri => Self::FRI,
            Weekday::Sat => Self::SAT,
            Weekday::Sun => Self::SUN,
        };
        self.0 & bit.0 != 0
    }
}

impl BitOr for WeekdayMask {
    type Output = WeekdayMask;

    fn bitor(self, rhs: WeekdayMask) -> WeekdayMask {
        WeekdayMask(self.0 | rhs.0)
    }
}

impl fmt::Debug for WeekdayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeekdayMask({:#09b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_stored_values() {
        assert_eq!(WeekdayMask::WEEKDAYS.bits(), 31);
        assert_eq!(WeekdayMask::WEEKENDS.bits(), 96);
    }

    #[test]
    fn contains_respects_bits() {
        let mask = WeekdayMask::MON | WeekdayMask::WED | WeekdayMask::FRI;

        assert!(mask.contains(Weekday::Mon));
        assert!(!mask.contains(Weekday::Tue));
        assert!(mask.contains(Weekday::Wed));
        assert!(mask.contains(Weekday::Fri));
        assert!(!mask.contains(Weekday::Sun));
    }

    #[test]
    fn weekdays_exclude_weekend() {
        assert!(WeekdayMask::WEEKDAYS.contains(Weekday::Mon));
        assert!(WeekdayMask::WEEKDAYS.contains(Weekday::Fri));
        assert!(!WeekdayMask::WEEKDAYS.contains(Weekday::Sat));
        assert!(!WeekdayMask::WEEKDAYS.contains(Weekday::Sun));
    }

    #[test]
    fn from_bits_drops_high_bit() {
        assert_eq!(WeekdayMask::from_bits(0xff).bits(), 0x7f);
    }

    #[test]
    fn empty_mask_contains_nothing() {
        let mask = WeekdayMask::default();
        assert!(mask.is_empty());
        assert!(!mask.contains(Weekday::Mon));
    }
}
