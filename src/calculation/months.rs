//! Month catalogue and month filtering.

use std::collections::BTreeSet;

use crate::models::{AttendanceRecord, Employee, MonthKey};

/// Lists every month that has data, ascending.
///
/// A month has data if any record falls in it or if it is an employee's header period.
pub fn available_months(employees: &[Employee]) -> Vec<MonthKey> {
    let mut months = BTreeSet::new();

    for employee in employees {
        if let (Some(year), Some(month)) = (employee.period_year, employee.period_month) {
            months.extend(MonthKey::new(year, month));
        }
        months.extend(
            employee
                .attendance
                .iter()
                .filter_map(|record| MonthKey::new(record.year, record.month)),
        );
    }

    months.into_iter().collect()
}

/// Selects the records whose own year and month equal `month`.
pub fn records_in_month(records: &[AttendanceRecord], month: MonthKey) -> Vec<&AttendanceRecord> {
    records
        .iter()
        .filter(|record| record.year == month.year && record.month == month.month)
        .collect()
}
