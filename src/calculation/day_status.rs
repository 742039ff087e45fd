//! Per-day attendance status and lateness.
//!
//! A day is classified in a fixed priority order: holiday, weekend, late, on time,
//! absent. Clock tokens are parsed as times, so `9:05` and `09:05` compare equal.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::business_days::is_holiday;
use crate::models::{AttendanceRecord, HolidaySet};

/// The attendance status of one day.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::calculation::DayStatus;
///
/// assert_eq!(DayStatus::OnTime.to_string(), "On time");
/// assert!(DayStatus::Late.is_present());
/// assert!(!DayStatus::Weekend.is_present());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The date is in the holiday set.
    Holiday,
    /// Saturday or Sunday.
    Weekend,
    /// Morning clock-in after the late threshold.
    Late,
    /// Morning clock-in at or before the late threshold.
    OnTime,
    /// Working day without a morning clock-in.
    Absent,
}

impl DayStatus {
    /// Returns true for statuses that count as attended.
    pub fn is_present(&self) -> bool {
        matches!(self, DayStatus::Late | DayStatus::OnTime)
    }

    /// Returns true for statuses that count towards working days.
    pub fn is_working_day(&self) -> bool {
        !matches!(self, DayStatus::Holiday | DayStatus::Weekend)
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayStatus::Holiday => write!(f, "Holiday"),
            DayStatus::Weekend => write!(f, "Weekend"),
            DayStatus::Late => write!(f, "Late"),
            DayStatus::OnTime => write!(f, "On time"),
            DayStatus::Absent => write!(f, "Absent"),
        }
    }
}

/// Parses an `H:MM`/`HH:MM` clock token.
pub fn parse_clock_time(token: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(token.trim(), "%H:%M").ok()
}

/// Returns true if a morning clock-in is strictly after `late_after`.
///
/// Tokens that are not valid times are never late.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use fingerprint_attendance::calculation::is_late;
///
/// let late_after = NaiveTime::from_hms_opt(6, 45, 0).unwrap();
/// assert!(!is_late("06:45", late_after));
/// assert!(is_late("06:46", late_after));
/// assert!(is_late("7:00", late_after));
/// ```
pub fn is_late(clock_in: &str, late_after: NaiveTime) -> bool {
    parse_clock_time(clock_in).is_some_and(|time| time > late_after)
}

/// Classifies the status for a day given whether it is a weekend and its morning-in.
pub(crate) fn status_for(
    holiday: bool,
    weekend: bool,
    morning_in: Option<&str>,
    late_after: NaiveTime,
) -> DayStatus {
    if holiday {
        DayStatus::Holiday
    } else if weekend {
        DayStatus::Weekend
    } else {
        match morning_in {
            Some(time) if is_late(time, late_after) => DayStatus::Late,
            Some(_) => DayStatus::OnTime,
            None => DayStatus::Absent,
        }
    }
}

/// Classifies one attendance record.
///
/// The weekend test uses the weekday code printed on the record.
pub fn classify_day(
    record: &AttendanceRecord,
    holidays: &HolidaySet,
    late_after: NaiveTime,
) -> DayStatus {
    status_for(
        is_holiday(&record.iso_date(), holidays),
        record.is_weekend(),
        record.morning_in(),
        late_after,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftTimes;
    use chrono::{Datelike, NaiveDate};

    fn late_after() -> NaiveTime {
        NaiveTime::from_hms_opt(6, 45, 0).unwrap()
    }

    fn record(date: &str, day: &str, morning_in: Option<&str>) -> AttendanceRecord {
        let full_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        AttendanceRecord {
            date_label: full_date.format("%m.%d").to_string(),
            full_date,
            day_of_week: day.to_string(),
            month: full_date.month(),
            year: full_date.year(),
            morning: ShiftTimes::new(morning_in.map(str::to_string), None),
            afternoon: ShiftTimes::default(),
            evening: ShiftTimes::default(),
        }
    }

    #[test]
    fn test_priority_order() {
        let holidays = HolidaySet::from_dates(["2025-06-07", "2025-06-10"]).unwrap();

        // Holiday wins over weekend
        let sat_holiday = record("2025-06-07", "SAT", Some("07:30"));
        assert_eq!(classify_day(&sat_holiday, &holidays, late_after()), DayStatus::Holiday);

        // Holiday wins over a clock-in
        let tue_holiday = record("2025-06-10", "TUE", Some("06:30"));
        assert_eq!(classify_day(&tue_holiday, &holidays, late_after()), DayStatus::Holiday);

        let sunday = record("2025-06-08", "SUN", Some("06:30"));
        assert_eq!(classify_day(&sunday, &holidays, late_after()), DayStatus::Weekend);
    }

    #[test]
    fn test_late_on_time_absent() {
        let holidays = HolidaySet::new();
        assert_eq!(
            classify_day(&record("2025-06-02", "MON", Some("06:46")), &holidays, late_after()),
            DayStatus::Late
        );
        assert_eq!(
            classify_day(&record("2025-06-02", "MON", Some("06:45")), &holidays, late_after()),
            DayStatus::OnTime
        );
        assert_eq!(
            classify_day(&record("2025-06-02", "MON", None), &holidays, late_after()),
            DayStatus::Absent
        );
    }

    #[test]
    fn test_single_digit_hour_compares_as_time() {
        // As strings "9:05" < "06:45"; as times it is late
        assert!(is_late("9:05", late_after()));
        assert!(!is_late("6:30", late_after()));
    }

    #[test]
    fn test_unparseable_clock_in_is_not_late() {
        assert!(!is_late("25:99", late_after()));
        assert!(!is_late("", late_after()));
    }

    #[test]
    fn test_weekend_label_is_case_insensitive() {
        let record = record("2025-06-07", " sat ", Some("06:30"));
        assert_eq!(
            classify_day(&record, &HolidaySet::new(), late_after()),
            DayStatus::Weekend
        );
    }

    #[test]
    fn test_status_helpers() {
        assert!(DayStatus::OnTime.is_present());
        assert!(!DayStatus::Absent.is_present());
        assert!(DayStatus::Absent.is_working_day());
        assert!(!DayStatus::Holiday.is_working_day());
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&DayStatus::OnTime).unwrap(), "\"on_time\"");
    }
}
