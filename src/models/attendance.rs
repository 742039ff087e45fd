//! Attendance record model.
//!
//! An [`AttendanceRecord`] is one calendar day of clock times for an employee, as
//! recovered from one day block of the attendance table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weekday code the clock prints for Saturday.
pub const SATURDAY_CODE: &str = "SAT";

/// Weekday code the clock prints for Sunday.
pub const SUNDAY_CODE: &str = "SUN";

/// Clock-in and clock-out times for one shift.
///
/// Times are the canonical `H:MM`/`HH:MM` tokens produced by
/// [`extract_time`](crate::extraction::extract_time).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftTimes {
    /// Clock-in time.
    #[serde(rename = "in")]
    pub clock_in: Option<String>,
    /// Clock-out time.
    #[serde(rename = "out")]
    pub clock_out: Option<String>,
}

impl ShiftTimes {
    /// Creates a shift from optional in/out tokens.
    pub fn new(clock_in: Option<String>, clock_out: Option<String>) -> Self {
        Self {
            clock_in,
            clock_out,
        }
    }

    /// Returns true when neither time was recorded.
    pub fn is_empty(&self) -> bool {
        self.clock_in.is_none() && self.clock_out.is_none()
    }
}

/// One calendar day's shift data for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The raw `MM.DD` label as printed.
    pub date_label: String,
    /// The concrete calendar date of this day.
    pub full_date: NaiveDate,
    /// The weekday code as printed in the sheet (e.g. `SAT`).
    pub day_of_week: String,
    /// Month taken from the label (1-12).
    pub month: u32,
    /// Year the day was resolved against.
    pub year: i32,
    /// Morning shift times.
    pub morning: ShiftTimes,
    /// Afternoon shift times.
    pub afternoon: ShiftTimes,
    /// Evening shift times.
    pub evening: ShiftTimes,
}

impl AttendanceRecord {
    /// Returns the de-duplication key of this record within one employee.
    pub fn day_key(&self) -> (&str, u32, i32) {
        (&self.date_label, self.month, self.year)
    }

    /// Returns the calendar date rendered as `YYYY-MM-DD`, the holiday lookup key.
    ///
    /// # Example
    ///
    /// ```
    /// use fingerprint_attendance::models::{AttendanceRecord, ShiftTimes};
    /// use chrono::NaiveDate;
    ///
    /// let record = AttendanceRecord {
    ///     date_label: "06.05".to_string(),
    ///     full_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
    ///     day_of_week: "THU".to_string(),
    ///     month: 6,
    ///     year: 2025,
    ///     morning: ShiftTimes::default(),
    ///     afternoon: ShiftTimes::default(),
    ///     evening: ShiftTimes::default(),
    /// };
    /// assert_eq!(record.iso_date(), "2025-06-05");
    /// ```
    pub fn iso_date(&self) -> String {
        self.full_date.format("%Y-%m-%d").to_string()
    }

    /// Returns true when the printed weekday is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        let code = self.day_of_week.trim();
        code.eq_ignore_ascii_case(SATURDAY_CODE) || code.eq_ignore_ascii_case(SUNDAY_CODE)
    }

    /// Returns the morning clock-in time, if one was recorded.
    pub fn morning_in(&self) -> Option<&str> {
        self.morning.clock_in.as_deref()
    }
}
