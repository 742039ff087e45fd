//! Cross-upload merging of employee records.
//!
//! Later uploads only fill gaps: a day already on file is never overwritten, and an
//! employee's department is only backfilled while it is still empty.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AttendanceRecord, Employee};

/// Counts describing what a merge changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MergeReport {
    /// Incoming employees with no existing match, appended as new.
    pub employees_added: usize,
    /// Incoming employees matched to an existing one.
    pub employees_updated: usize,
    /// Attendance records appended.
    pub records_added: usize,
    /// Attendance records dropped because their day was already on file.
    pub records_skipped: usize,
}

/// Merges newly extracted employees into a previously accumulated list.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::models::{Employee, EmployeeHeader};
/// use fingerprint_attendance::reconciliation::merge_employees;
///
/// let employee = |name: &str, dept: &str| {
///     let header = EmployeeHeader {
///         name: name.to_string(),
///         employee_id: "7".to_string(),
///         department: dept.to_string(),
///         ..EmployeeHeader::default()
///     };
///     Employee::from_header(header, "June", 1, vec![])
/// };
///
/// let merged = merge_employees(vec![employee("Jane Doe", "")], vec![employee("JANE DOE", "Prefects")]);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].department, "Prefects");
/// ```
pub fn merge_employees(existing: Vec<Employee>, incoming: Vec<Employee>) -> Vec<Employee> {
    let mut merged = existing;
    merge_into(&mut merged, incoming);
    merged
}

/// Merges `incoming` into `existing` in place and reports what changed.
///
/// Each incoming employee is matched against everything merged so far, including
/// employees appended earlier in the same call. Afterwards every touched employee's
/// attendance is free of duplicate `(date_label, month, year)` days and sorted by date.
pub fn merge_into(existing: &mut Vec<Employee>, incoming: Vec<Employee>) -> MergeReport {
    let mut report = MergeReport::default();

    for mut employee in incoming {
        let records = std::mem::take(&mut employee.attendance);

        let target = match existing.iter().position(|e| e.is_same_person(&employee)) {
            Some(index) => {
                report.employees_updated += 1;
                let target = &mut existing[index];
                if target.department.is_empty() && !employee.department.is_empty() {
                    debug!(
                        employee = %target.name,
                        department = %employee.department,
                        "Backfilling department"
                    );
                    target.department = employee.department;
                }
                target
            }
            None => {
                report.employees_added += 1;
                existing.push(employee);
                let last = existing.len() - 1;
                &mut existing[last]
            }
        };

        let (added, skipped) = merge_records(&mut target.attendance, records);
        report.records_added += added;
        report.records_skipped += skipped;
    }

    report
}

/// Appends records whose day is not yet present, then restores date order.
///
/// Returns `(added, skipped)`. The sort is stable, so records on the same date keep
/// their relative order.
pub fn merge_records(
    attendance: &mut Vec<AttendanceRecord>,
    incoming: Vec<AttendanceRecord>,
) -> (usize, usize) {
    let mut added = 0;
    let mut skipped = 0;

    for record in incoming {
        let exists = attendance
            .iter()
            .any(|existing| existing.day_key() == record.day_key());
        if exists {
            skipped += 1;
        } else {
            attendance.push(record);
            added += 1;
        }
    }

    attendance.sort_by_key(|record| record.full_date);
    (added, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeHeader, ShiftTimes};
    use chrono::NaiveDate;

    fn record(label: &str, morning_in: Option<&str>) -> AttendanceRecord {
        let (month, day) = label.split_once('.').unwrap();
        let month: u32 = month.parse().unwrap();
        AttendanceRecord {
            date_label: label.to_string(),
            full_date: NaiveDate::from_ymd_opt(2025, month, day.parse().unwrap()).unwrap(),
            day_of_week: "MON".to_string(),
            month,
            year: 2025,
            morning: ShiftTimes::new(morning_in.map(str::to_string), None),
            afternoon: ShiftTimes::default(),
            evening: ShiftTimes::default(),
        }
    }

    fn employee(name: &str, id: &str, dept: &str, attendance: Vec<AttendanceRecord>) -> Employee {
        let header = EmployeeHeader {
            name: name.to_string(),
            employee_id: id.to_string(),
            department: dept.to_string(),
            ..EmployeeHeader::default()
        };
        Employee::from_header(header, "Sheet1", 1, attendance)
    }

    fn labels(employee: &Employee) -> Vec<&str> {
        employee
            .attendance
            .iter()
            .map(|r| r.date_label.as_str())
            .collect()
    }

    #[test]
    fn test_new_employee_is_appended() {
        let existing = vec![employee("Jane", "1", "", vec![record("06.02", None)])];
        let incoming = vec![employee("John", "2", "", vec![record("06.02", None)])];

        let merged = merge_employees(existing, incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].name, "John");
    }

    #[test]
    fn test_into_empty_list() {
        let incoming = vec![employee("Jane", "1", "Ops", vec![record("06.03", None)])];

        let merged = merge_employees(vec![], incoming.clone());
        assert_eq!(merged, incoming);
    }

    #[test]
    fn test_existing_day_is_never_overwritten() {
        let existing = vec![employee("Jane", "1", "", vec![record("06.02", Some("06:30"))])];
        let incoming = vec![employee("Jane", "1", "", vec![record("06.02", Some("08:00"))])];

        let mut merged = existing;
        let report = merge_into(&mut merged, incoming);

        assert_eq!(merged[0].attendance.len(), 1);
        assert_eq!(merged[0].attendance[0].morning_in(), Some("06:30"));
        assert_eq!(report.records_skipped, 1);
        assert_eq!(report.records_added, 0);
    }

    #[test]
    fn test_gaps_are_filled_and_sorted() {
        let existing = vec![employee(
            "Jane",
            "1",
            "",
            vec![record("06.02", None), record("06.05", None)],
        )];
        let incoming = vec![employee(
            "JANE",
            "1",
            "",
            vec![record("06.04", None), record("06.01", None), record("06.02", None)],
        )];

        let mut merged = existing;
        let report = merge_into(&mut merged, incoming);

        assert_eq!(merged.len(), 1);
        assert_eq!(labels(&merged[0]), vec!["06.01", "06.02", "06.04", "06.05"]);
        assert_eq!(
            report,
            MergeReport {
                employees_added: 0,
                employees_updated: 1,
                records_added: 2,
                records_skipped: 1,
            }
        );
    }

    #[test]
    fn test_department_backfilled_only_when_empty() {
        let merged = merge_employees(
            vec![employee("Jane", "1", "", vec![])],
            vec![employee("Jane", "1", "Prefects", vec![])],
        );
        assert_eq!(merged[0].department, "Prefects");

        let merged = merge_employees(merged, vec![employee("Jane", "1", "Library", vec![])]);
        assert_eq!(merged[0].department, "Prefects");
    }

    #[test]
    fn test_same_name_different_id_stays_separate() {
        let merged = merge_employees(
            vec![employee("Jane", "1", "", vec![record("06.02", None)])],
            vec![employee("Jane", "2", "", vec![record("06.02", None)])],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_duplicates_within_one_upload_collapse() {
        let incoming = vec![
            employee("Jane", "1", "", vec![record("06.03", None), record("06.02", None)]),
            employee("jane", "1", "Ops", vec![record("06.02", None), record("06.04", None)]),
        ];

        let mut merged = Vec::new();
        let report = merge_into(&mut merged, incoming);

        assert_eq!(merged.len(), 1);
        assert_eq!(labels(&merged[0]), vec!["06.02", "06.03", "06.04"]);
        assert_eq!(merged[0].department, "Ops");
        assert_eq!(report.employees_added, 1);
        assert_eq!(report.employees_updated, 1);
    }

    #[test]
    fn test_new_employee_records_are_sorted_and_deduplicated() {
        let incoming = vec![employee(
            "Jane",
            "1",
            "",
            vec![record("06.08", None), record("06.01", None), record("06.08", None)],
        )];

        let merged = merge_employees(vec![], incoming);
        assert_eq!(labels(&merged[0]), vec!["06.01", "06.08"]);
    }

    #[test]
    fn test_same_label_in_different_years_are_distinct_days() {
        let mut other_year = record("06.02", None);
        other_year.year = 2024;
        other_year.full_date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

        let merged = merge_employees(
            vec![employee("Jane", "1", "", vec![record("06.02", None)])],
            vec![employee("Jane", "1", "", vec![other_year])],
        );

        assert_eq!(merged[0].attendance.len(), 2);
        assert_eq!(merged[0].attendance[0].year, 2024);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let existing = vec![employee("Jane", "1", "", vec![record("06.02", None)])];
        let upload = vec![
            employee("Jane", "1", "Ops", vec![record("06.03", None), record("06.01", None)]),
            employee("John", "2", "", vec![record("06.02", None)]),
        ];

        let once = merge_employees(existing, upload.clone());
        let twice = merge_employees(once.clone(), upload);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_records_counts() {
        let mut attendance = vec![record("06.02", None)];
        let (added, skipped) =
            merge_records(&mut attendance, vec![record("06.02", None), record("06.01", None)]);

        assert_eq!((added, skipped), (1, 1));
        assert_eq!(attendance[0].date_label, "06.01");
    }
}
