//! Attendance table scanning.
//!
//! Below each header the clock prints a table with two calendar days side by side per
//! physical row. Each half is a [`DayBlock`]: date label, weekday code, then morning,
//! afternoon and evening in/out pairs.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::header::{DEPT_MARKER, NAME_MARKER};
use super::time_cell::time_at;
use crate::models::{AttendanceRecord, Cell, ShiftTimes, row_text};

/// Default number of rows examined after the table start.
pub const DEFAULT_LOOKAHEAD_ROWS: usize = 50;

/// Number of columns one day block occupies.
pub const DAY_BLOCK_WIDTH: usize = 8;

static DATE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})\.([0-9]{2})$").expect("valid date label pattern"));

/// Column layout of one printed calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBlock {
    /// Column of the `MM.DD` label.
    pub date_col: usize,
    /// Column of the weekday code.
    pub day_col: usize,
    /// `(in, out)` columns for morning, afternoon and evening.
    pub shifts: [(usize, usize); 3],
}

impl DayBlock {
    /// Lays a day block out starting at `base`.
    pub const fn at(base: usize) -> Self {
        Self {
            date_col: base,
            day_col: base + 1,
            shifts: [
                (base + 2, base + 3),
                (base + 4, base + 5),
                (base + 6, base + 7),
            ],
        }
    }

    /// Reads this block out of a row.
    ///
    /// Returns `None` when the label cell is missing, is not an `MM.DD` text label, or
    /// names a day that does not exist in `year`.
    pub fn read(&self, row: &[Cell], year: i32) -> Option<AttendanceRecord> {
        let label = row.get(self.date_col)?.as_text()?.trim();
        let (month, day) = parse_date_label(label)?;
        let Some(full_date) = NaiveDate::from_ymd_opt(year, month, day) else {
            debug!(label, year, "Date label does not name a calendar day");
            return None;
        };

        let shift = |(in_col, out_col): (usize, usize)| {
            ShiftTimes::new(time_at(row, in_col), time_at(row, out_col))
        };

        Some(AttendanceRecord {
            date_label: label.to_string(),
            full_date,
            day_of_week: row
                .get(self.day_col)
                .map(|cell| cell.to_text().trim().to_string())
                .unwrap_or_default(),
            month,
            year,
            morning: shift(self.shifts[0]),
            afternoon: shift(self.shifts[1]),
            evening: shift(self.shifts[2]),
        })
    }
}

/// The left-hand day of each table row.
pub const LEFT_DAY: DayBlock = DayBlock::at(0);

/// The right-hand day of each table row (the second week pane).
pub const RIGHT_DAY: DayBlock = DayBlock::at(DAY_BLOCK_WIDTH);

/// Splits an `MM.DD` label into month and day.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::extraction::parse_date_label;
///
/// assert_eq!(parse_date_label("06.01"), Some((6, 1)));
/// assert_eq!(parse_date_label("6.1"), None);
/// ```
pub fn parse_date_label(label: &str) -> Option<(u32, u32)> {
    let caps = DATE_LABEL.captures(label)?;
    let month = caps.get(1)?.as_str().parse().ok()?;
    let day = caps.get(2)?.as_str().parse().ok()?;
    Some((month, day))
}

/// Returns true if a row starts another employee's block.
fn starts_next_block(row: &[Cell]) -> bool {
    let text = row_text(row);
    text.contains(NAME_MARKER) || text.contains(DEPT_MARKER)
}

/// Scans the attendance table that starts at `start_row`.
///
/// At most `lookahead` rows are examined. Scanning stops, without consuming the row, at
/// the first row mentioning `Name:` or `Dept:`. Rows whose first cell is not an `MM.DD`
/// label are skipped. Each accepted row yields its left day and, when present, its right
/// day, in that order; the result is in row order, not necessarily chronological.
///
/// `year` is applied to every label. Callers resolve it from the employee's period and
/// decide explicitly what to use when there is none.
pub fn scan_attendance_table(
    rows: &[Vec<Cell>],
    start_row: usize,
    year: i32,
    lookahead: usize,
) -> Vec<AttendanceRecord> {
    let end = start_row.saturating_add(lookahead).min(rows.len());
    let mut records = Vec::new();

    for row in rows.get(start_row..end).unwrap_or_default() {
        if row.is_empty() {
            continue;
        }
        if starts_next_block(row) {
            break;
        }
        let Some(left) = LEFT_DAY.read(row, year) else {
            continue;
        };
        records.push(left);

        if row.len() > RIGHT_DAY.date_col {
            if let Some(right) = RIGHT_DAY.read(row, year) {
                records.push(right);
            }
        }
    }

    records
}
