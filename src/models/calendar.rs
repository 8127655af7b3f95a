//! Work calendar model.
//!
//! Classifies roster dates as regular working days or premium days
//! (weekends and public holidays). Shifts worked on premium days are
//! paid as overtime by the cost objective.
//!
//! # Precedence
//! A date is a premium day iff:
//! - Its weekday is listed in `weekend_days`, OR
//! - It appears in `holidays`.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Weekend/holiday calendar for a roster period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkCalendar {
    /// Weekdays treated as weekend (default: Saturday, Sunday).
    pub weekend_days: Vec<Weekday>,
    /// Explicit public holidays.
    pub holidays: BTreeSet<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
            holidays: BTreeSet::new(),
        }
    }
}

impl WorkCalendar {
    /// Creates the default Saturday/Sunday calendar with no holidays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar without weekends or holidays (every day regular).
    pub fn without_weekends() -> Self {
        Self {
            weekend_days: Vec::new(),
            holidays: BTreeSet::new(),
        }
    }

    /// Replaces the weekend weekdays.
    pub fn with_weekend_days(mut self, days: Vec<Weekday>) -> Self {
        self.weekend_days = days;
        self
    }

    /// Adds a holiday.
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Whether the date falls on a configured weekend day.
    #[inline]
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday())
    }

    /// Whether the date is a listed holiday.
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Whether a shift on this date is paid as overtime.
    pub fn is_premium_day(&self, date: NaiveDate) -> bool {
        self.is_weekend(date) || self.is_holiday(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_weekends() {
        let cal = WorkCalendar::new();
        assert!(cal.is_weekend(date(2024, 1, 6))); // Saturday
        assert!(cal.is_weekend(date(2024, 1, 7))); // Sunday
        assert!(!cal.is_weekend(date(2024, 1, 8))); // Monday
    }

    #[test]
    fn test_holiday_is_premium() {
        let cal = WorkCalendar::new().with_holiday(date(2024, 1, 1));
        assert!(cal.is_holiday(date(2024, 1, 1)));
        assert!(cal.is_premium_day(date(2024, 1, 1))); // Monday, but holiday
        assert!(!cal.is_premium_day(date(2024, 1, 2)));
    }

    #[test]
    fn test_without_weekends() {
        let cal = WorkCalendar::without_weekends();
        assert!(!cal.is_premium_day(date(2024, 1, 6)));
    }

    #[test]
    fn test_custom_weekend() {
        let cal = WorkCalendar::new().with_weekend_days(vec![Weekday::Fri]);
        assert!(cal.is_weekend(date(2024, 1, 5)));
        assert!(!cal.is_weekend(date(2024, 1, 6)));
    }
}
