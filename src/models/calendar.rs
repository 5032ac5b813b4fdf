//! Working-day calendar utilities.
//!
//! A fixed Monday–Friday work week: Saturday and Sunday are weekend days,
//! every other day is a working day. There is no holiday table.
//!
//! # Date Model
//! All ranges are inclusive calendar-day ranges over `NaiveDate`.
//! An inverted range (`end < start`) is empty.
//!
//! # Reference
//! ISO 8601 weekday numbering (Monday = 1)

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Whether the date falls on a Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts weekdays in `[start, end]`.
///
/// Returns 0 for an all-weekend or inverted range.
pub fn working_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    date_range(start, end).filter(|d| !is_weekend(*d)).count() as u32
}

/// Inclusive ascending iterator over `[start, end]`.
///
/// Each call builds a fresh iterator; clone it to walk the same range twice.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        next: (start <= end).then_some(start),
        end,
    }
}

/// The Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Iterator returned by [`date_range`].
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    /// Number of days remaining in the range.
    pub fn len(&self) -> usize {
        match self.next {
            Some(next) => ((self.end - next).num_days() + 1) as usize,
            None => 0,
        }
    }

    /// Whether the range has no days left.
    pub fn is_empty(&self) -> bool {
        self.next.is_none()
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_weekend() {
        assert!(!is_weekend(date(2025, 1, 6))); // Monday
        assert!(!is_weekend(date(2025, 1, 10))); // Friday
        assert!(is_weekend(date(2025, 1, 11))); // Saturday
        assert!(is_weekend(date(2025, 1, 12))); // Sunday
    }

    #[test]
    fn test_working_days_full_week() {
        assert_eq!(working_days_between(date(2025, 1, 6), date(2025, 1, 12)), 5);
    }

    #[test]
    fn test_working_days_single_day() {
        assert_eq!(working_days_between(date(2025, 1, 8), date(2025, 1, 8)), 1);
        assert_eq!(working_days_between(date(2025, 1, 11), date(2025, 1, 11)), 0);
    }

    #[test]
    fn test_working_days_weekend_only() {
        assert_eq!(working_days_between(date(2025, 1, 11), date(2025, 1, 12)), 0);
    }

    #[test]
    fn test_working_days_inverted() {
        assert_eq!(working_days_between(date(2025, 1, 10), date(2025, 1, 6)), 0);
    }

    #[test]
    fn test_date_range_inclusive() {
        let days: Vec<_> = date_range(date(2025, 1, 30), date(2025, 2, 2)).collect();
        assert_eq!(
            days,
            vec![date(2025, 1, 30), date(2025, 1, 31), date(2025, 2, 1), date(2025, 2, 2)]
        );
    }

    #[test]
    fn test_date_range_restartable() {
        let range = date_range(date(2025, 1, 6), date(2025, 1, 8));
        assert_eq!(range.len(), 3);
        let first: Vec<_> = range.clone().collect();
        let second: Vec<_> = range.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_date_range_empty() {
        let mut range = date_range(date(2025, 1, 8), date(2025, 1, 6));
        assert!(range.is_empty());
        assert_eq!(range.next(), None);
    }

    #[test]
    fn test_week_start() {
        assert_eq!(week_start(date(2025, 1, 6)), date(2025, 1, 6));
        assert_eq!(week_start(date(2025, 1, 12)), date(2025, 1, 6));
        // Crosses a month boundary
        assert_eq!(week_start(date(2025, 2, 1)), date(2025, 1, 27));
    }
}
