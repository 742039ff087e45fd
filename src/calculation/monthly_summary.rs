//! Monthly attendance summary for one employee.
//!
//! The summary walks every calendar day of the month rather than the employee's
//! records, so days the clock never printed still count as working days (and as
//! absent). Weekends here are computed from the calendar.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::day_status::{DayStatus, status_for};
use crate::models::{AttendanceRecord, Employee, HolidaySet, MonthKey};

/// The status of one calendar day in a monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// The calendar date.
    pub date: NaiveDate,
    /// Three-letter weekday code, e.g. `MON`.
    pub day_of_week: String,
    /// The morning clock-in, if recorded.
    pub morning_in: Option<String>,
    /// Classified status.
    pub status: DayStatus,
}

/// Attendance totals for one employee in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Employee name.
    pub employee: String,
    /// Employee ID, possibly empty.
    pub employee_id: String,
    /// The summarised month.
    pub month: MonthKey,
    /// Weekdays that are not holidays.
    pub working_days: usize,
    /// Working days with a morning clock-in.
    pub present_days: usize,
    /// Present days clocked in after the late threshold.
    pub late_days: usize,
    /// Present days clocked in at or before the late threshold.
    pub on_time_days: usize,
    /// Working days without a morning clock-in.
    pub absent_days: usize,
    /// `present_days / working_days` as a whole percentage.
    pub attendance_rate: Decimal,
    /// Every calendar day of the month, in order.
    pub days: Vec<DaySummary>,
}

/// Computes a whole-percent attendance rate, or zero when there are no working days.
///
/// Halves round away from zero.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::calculation::attendance_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(attendance_rate(1, 8), Decimal::from(13));
/// assert_eq!(attendance_rate(0, 0), Decimal::ZERO);
/// ```
pub fn attendance_rate(present: usize, working: usize) -> Decimal {
    if working == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(present) * Decimal::ONE_HUNDRED / Decimal::from(working))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn weekday_code(date: NaiveDate) -> String {
    date.format("%a").to_string().to_uppercase()
}

fn record_on(records: &[AttendanceRecord], date: NaiveDate) -> Option<&AttendanceRecord> {
    records.iter().find(|record| record.full_date == date)
}

/// Summarises one employee's attendance for a calendar month.
pub fn monthly_summary(
    employee: &Employee,
    month: MonthKey,
    holidays: &HolidaySet,
    late_after: NaiveTime,
) -> MonthlySummary {
    let days: Vec<DaySummary> = month
        .days()
        .map(|date| {
            let morning_in = record_on(&employee.attendance, date)
                .and_then(AttendanceRecord::morning_in)
                .map(str::to_string);
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            let status = status_for(
                holidays.contains_date(date),
                weekend,
                morning_in.as_deref(),
                late_after,
            );
            DaySummary {
                date,
                day_of_week: weekday_code(date),
                morning_in,
                status,
            }
        })
        .collect();

    let count = |wanted: DayStatus| days.iter().filter(|day| day.status == wanted).count();
    let working_days = days.iter().filter(|day| day.status.is_working_day()).count();
    let late_days = count(DayStatus::Late);
    let on_time_days = count(DayStatus::OnTime);
    let absent_days = count(DayStatus::Absent);
    let present_days = late_days + on_time_days;

    MonthlySummary {
        employee: employee.name.clone(),
        employee_id: employee.employee_id.clone(),
        month,
        working_days,
        present_days,
        late_days,
        on_time_days,
        absent_days,
        attendance_rate: attendance_rate(present_days, working_days),
        days,
    }
}
