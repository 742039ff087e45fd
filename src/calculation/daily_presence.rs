//! Per-date headcounts across employees.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::business_days::is_working_day;
use crate::models::{Employee, HolidaySet, MonthKey};

/// How many employees clocked in on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPresence {
    /// The `MM.DD` label of the first record seen for the date.
    pub date_label: String,
    /// The calendar date.
    pub full_date: NaiveDate,
    /// The printed weekday code.
    pub day_of_week: String,
    /// Employees with a morning clock-in on this date.
    pub count: usize,
}

/// Counts employees with a morning clock-in per working date, ascending by date.
///
/// Records on weekends (by printed label) and holidays are ignored. When `month` is
/// given, only records from that month are counted.
pub fn daily_presence(
    employees: &[Employee],
    month: Option<MonthKey>,
    holidays: &HolidaySet,
) -> Vec<DailyPresence> {
    let mut by_date: BTreeMap<NaiveDate, DailyPresence> = BTreeMap::new();

    let records = employees.iter().flat_map(|e| e.attendance.iter());
    for record in records {
        if month.is_some_and(|m| !m.contains(record.full_date)) {
            continue;
        }
        if record.morning_in().is_none() || !is_working_day(record, holidays) {
            continue;
        }
        by_date
            .entry(record.full_date)
            .or_insert_with(|| DailyPresence {
                date_label: record.date_label.clone(),
                full_date: record.full_date,
                day_of_week: record.day_of_week.clone(),
                count: 0,
            })
            .count += 1;
    }

    by_date.into_values().collect()
}
