//! Employee model.
//!
//! An [`Employee`] is one identity block found in a source grid, carrying the
//! attendance recovered from the table below its header.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attendance::AttendanceRecord;

/// Identity and period fields parsed from one header cell.
///
/// Produced by [`parse_header`](crate::extraction::parse_header); it has no attendance
/// and no provenance yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeHeader {
    /// Normalized display name (never empty).
    pub name: String,
    /// Employee ID, possibly empty.
    pub employee_id: String,
    /// Department, possibly empty.
    pub department: String,
    /// The unparsed period string, e.g. `25.06.01~25.06.30`.
    pub date_range_raw: String,
    /// First day of the period.
    pub start_date: Option<NaiveDate>,
    /// Last day of the period.
    pub end_date: Option<NaiveDate>,
    /// Month of `start_date`.
    pub period_month: Option<u32>,
    /// Year of `start_date`.
    pub period_year: Option<i32>,
}

/// One employee with their reconciled attendance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Normalized display name.
    pub name: String,
    /// Employee ID, possibly empty.
    #[serde(default)]
    pub employee_id: String,
    /// Department, possibly empty.
    #[serde(default)]
    pub department: String,
    /// The unparsed period string from the header cell.
    #[serde(default)]
    pub date_range_raw: String,
    /// First day of the period.
    pub start_date: Option<NaiveDate>,
    /// Last day of the period.
    pub end_date: Option<NaiveDate>,
    /// Month of `start_date`.
    pub period_month: Option<u32>,
    /// Year of `start_date`.
    pub period_year: Option<i32>,
    /// Sheet the header was found on.
    #[serde(default)]
    pub source_sheet: String,
    /// 1-based row of the header on its sheet.
    #[serde(default)]
    pub source_row: usize,
    /// Attendance records, ascending by date once merged.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl Employee {
    /// Builds an employee from a parsed header, its provenance and its attendance.
    pub fn from_header(
        header: EmployeeHeader,
        source_sheet: impl Into<String>,
        source_row: usize,
        attendance: Vec<AttendanceRecord>,
    ) -> Self {
        Self {
            name: header.name,
            employee_id: header.employee_id,
            department: header.department,
            date_range_raw: header.date_range_raw,
            start_date: header.start_date,
            end_date: header.end_date,
            period_month: header.period_month,
            period_year: header.period_year,
            source_sheet: source_sheet.into(),
            source_row,
            attendance,
        }
    }

    /// Returns true if both values represent the same person.
    ///
    /// Names compare case-insensitively, IDs exactly. Two employees with an empty ID and
    /// the same name are treated as one person.
    ///
    /// # Example
    ///
    /// ```
    /// use fingerprint_attendance::models::{Employee, EmployeeHeader};
    ///
    /// let header = |name: &str, id: &str| EmployeeHeader {
    ///     name: name.to_string(),
    ///     employee_id: id.to_string(),
    ///     ..EmployeeHeader::default()
    /// };
    /// let a = Employee::from_header(header("Jane Doe", "17"), "June", 1, vec![]);
    /// let b = Employee::from_header(header("JANE DOE", "17"), "July", 40, vec![]);
    /// let c = Employee::from_header(header("Jane Doe", "18"), "June", 1, vec![]);
    /// assert!(a.is_same_person(&b));
    /// assert!(!a.is_same_person(&c));
    /// ```
    pub fn is_same_person(&self, other: &Employee) -> bool {
        self.employee_id == other.employee_id && self.name.to_lowercase() == other.name.to_lowercase()
    }
}
