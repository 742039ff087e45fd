//! Holiday-aware business-day counting.
//!
//! Weekends are recognised by the weekday code printed on each record, never
//! recomputed from the date. Holidays are always looked up by the record's derived
//! `YYYY-MM-DD` date.

use chrono::{Datelike, Weekday};

use crate::models::{AttendanceRecord, HolidaySet, MonthKey};

/// Checks whether a `YYYY-MM-DD` date string is in the holiday set.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::calculation::is_holiday;
/// use fingerprint_attendance::models::HolidaySet;
///
/// let holidays = HolidaySet::from_dates(["2025-06-10"]).unwrap();
/// assert!(is_holiday("2025-06-10", &holidays));
/// assert!(!is_holiday("2025-06-11", &holidays));
/// ```
pub fn is_holiday(date: &str, holidays: &HolidaySet) -> bool {
    holidays.contains(date)
}

/// Returns true if the record falls on a printed weekday that is not a holiday.
pub fn is_working_day(record: &AttendanceRecord, holidays: &HolidaySet) -> bool {
    !record.is_weekend() && !is_holiday(&record.iso_date(), holidays)
}

/// Counts records on working days (not SAT/SUN, not a holiday).
///
/// # Example
///
/// ```
/// use fingerprint_attendance::calculation::working_days_count;
/// use fingerprint_attendance::models::HolidaySet;
///
/// assert_eq!(working_days_count(&[], &HolidaySet::new()), 0);
/// ```
pub fn working_days_count(records: &[AttendanceRecord], holidays: &HolidaySet) -> usize {
    records
        .iter()
        .filter(|record| is_working_day(record, holidays))
        .count()
}

/// Counts working-day records that have a morning clock-in.
pub fn present_days_count(records: &[AttendanceRecord], holidays: &HolidaySet) -> usize {
    records
        .iter()
        .filter(|record| record.morning_in().is_some() && is_working_day(record, holidays))
        .count()
}

/// Counts the weekdays of a calendar month that are not holidays.
///
/// Unlike the record-based counts, the weekday here is computed from the calendar, so
/// days with no record at all are included.
pub fn calendar_working_days(month: MonthKey, holidays: &HolidaySet) -> usize {
    month
        .days()
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|day| !holidays.contains_date(*day))
        .count()
}
