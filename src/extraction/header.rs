//! Header cell parsing.
//!
//! An employee block is introduced by a free-text cell such as
//! `Dept:Prefects Name:John John Smith ID:123 Date:25.06.01~25.06.30`. Each field is
//! recovered by its own matcher so that one malformed field never costs the others.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::models::{Cell, EmployeeHeader};

/// Marker that identifies a header cell.
pub const NAME_MARKER: &str = "Name:";
/// Marker introducing the employee ID.
pub const ID_MARKER: &str = "ID:";
/// Marker introducing the period.
pub const DATE_MARKER: &str = "Date:";
/// Marker introducing the department.
pub const DEPT_MARKER: &str = "Dept:";

/// Columns (0-based) that may hold the overflow of a long name.
pub const SUPPLEMENTARY_NAME_COLUMNS: RangeInclusive<usize> = 4..=7;

const FIELD_MARKERS: [&str; 4] = [NAME_MARKER, ID_MARKER, DATE_MARKER, DEPT_MARKER];

static ID_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ID:[ \t]*(\S*)").expect("valid ID pattern"));
static DATE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Date:[ \t]*(\S*)").expect("valid date pattern"));

/// Returns true if the cell text carries the header marker.
pub fn is_header_cell(text: &str) -> bool {
    text.contains(NAME_MARKER)
}

/// Parses one header cell into an employee header.
///
/// `row` is the full row the cell sits in; cells in
/// [`SUPPLEMENTARY_NAME_COLUMNS`] are searched for name fragments the clock spilled
/// out of the header cell.
///
/// Returns `None` if the cell has no `Name:` marker or no name could be recovered.
/// A malformed period leaves the period fields empty without rejecting the header.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::extraction::parse_header;
///
/// let header = parse_header("Name:John John Smith ID:123", &[]).unwrap();
/// assert_eq!(header.name, "John Smith");
/// assert_eq!(header.employee_id, "123");
/// ```
pub fn parse_header(cell: &str, row: &[Cell]) -> Option<EmployeeHeader> {
    if !is_header_cell(cell) {
        return None;
    }

    let mut name = name_field(cell).map(dedupe_tokens).unwrap_or_default();
    for fragment in supplementary_fragments(row) {
        if !name.to_lowercase().contains(&fragment.to_lowercase()) {
            name.push(' ');
            name.push_str(fragment);
        }
    }
    let name = collapse_whitespace(&name);

    if name.is_empty() {
        debug!(cell, "Header cell has no recoverable name");
        return None;
    }

    let date_range_raw = token_field(&DATE_FIELD, cell).unwrap_or_default();
    let employee_id = token_field(&ID_FIELD, cell).unwrap_or_default();
    let department = department_field(cell).unwrap_or_default();

    let mut header = EmployeeHeader {
        name,
        employee_id,
        department,
        ..EmployeeHeader::default()
    };

    if !date_range_raw.is_empty() {
        match parse_period(&date_range_raw) {
            Some((start, end)) => {
                header.start_date = Some(start);
                header.end_date = Some(end);
                header.period_month = Some(start.month());
                header.period_year = Some(start.year());
            }
            None => warn!(
                employee = %header.name,
                date_range = %date_range_raw,
                "Unparsable date range in header"
            ),
        }
    }
    header.date_range_raw = date_range_raw;

    Some(header)
}

/// Parses a `YY.MM.DD~YY.MM.DD` period into its first and last day.
///
/// Two-digit years are read as `2000 + YY`. Both ends must parse for the period to be
/// returned.
pub fn parse_period(raw: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (start, end) = raw.trim().split_once('~')?;
    if end.contains('~') {
        return None;
    }
    Some((parse_short_date(start)?, parse_short_date(end)?))
}

fn parse_short_date(token: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };
    if year.len() > 2 || [year, month, day].iter().any(|p| !is_numeric(p)) {
        return None;
    }
    let year = 2000 + year.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
}

/// Text after `Name:` up to the next ID, date or department marker.
fn name_field(cell: &str) -> Option<&str> {
    span_after(cell, NAME_MARKER, &[ID_MARKER, DATE_MARKER, DEPT_MARKER])
}

/// Text after `Dept:` up to the next name, ID or date marker.
fn department_field(cell: &str) -> Option<String> {
    span_after(cell, DEPT_MARKER, &[NAME_MARKER, ID_MARKER, DATE_MARKER])
        .map(collapse_whitespace)
        .filter(|dept| !dept.is_empty())
}

fn token_field(pattern: &Regex, cell: &str) -> Option<String> {
    pattern
        .captures(cell)
        .and_then(|caps| caps.get(1))
        .map(|token| token.as_str().to_string())
        .filter(|token| !token.is_empty())
}

fn span_after<'a>(text: &'a str, marker: &str, stops: &[&str]) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = stops
        .iter()
        .filter_map(|stop| rest.find(stop))
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

fn supplementary_fragments(row: &[Cell]) -> impl Iterator<Item = &str> {
    SUPPLEMENTARY_NAME_COLUMNS
        .filter_map(move |column| row.get(column))
        .filter_map(Cell::as_text)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .filter(|text| !FIELD_MARKERS.iter().any(|marker| text.contains(marker)))
}

/// Keeps the first occurrence of each whitespace-separated token, ignoring case.
fn dedupe_tokens(raw: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    let mut kept: Vec<&str> = Vec::new();
    for token in raw.split_whitespace() {
        let lower = token.to_lowercase();
        if !seen.contains(&lower) {
            seen.push(lower);
            kept.push(token);
        }
    }
    kept.join(" ")
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
