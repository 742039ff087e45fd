//! Record extraction across sheets.
//!
//! Walks every row of a sheet looking for header cells, and for each header found scans
//! the attendance table printed a fixed number of rows below it.

use tracing::{debug, info, warn};

use super::header::{is_header_cell, parse_header};
use super::table::scan_attendance_table;
use crate::config::ExtractionSettings;
use crate::models::{Cell, Employee, Row, Workbook};

/// Extracts every employee block found on one sheet.
///
/// Each row is searched left to right for the first cell containing `Name:`; only that
/// cell is parsed as a header. The block's attendance is scanned from
/// `settings.table_row_offset` rows below the header, using the period year or, when
/// the header has none, `settings.fallback_year`.
///
/// A sheet without headers yields an empty list.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::config::ExtractionSettings;
/// use fingerprint_attendance::extraction::extract_from_grid;
/// use fingerprint_attendance::models::Cell;
///
/// let rows: Vec<Vec<Cell>> = vec![
///     vec![Cell::from("Name:Jane Doe ID:7 Date:25.06.01~25.06.30")],
///     vec![Cell::from("Date"), Cell::from("Week")],
///     vec![Cell::from("")],
///     vec![Cell::from("06.02"), Cell::from("MON"), Cell::from("06:40")],
/// ];
///
/// let employees = extract_from_grid(&rows, "June", &ExtractionSettings::new(2025));
/// assert_eq!(employees.len(), 1);
/// assert_eq!(employees[0].attendance.len(), 1);
/// assert_eq!(employees[0].source_row, 1);
/// ```
pub fn extract_from_grid(
    rows: &[Row],
    sheet_name: &str,
    settings: &ExtractionSettings,
) -> Vec<Employee> {
    let mut employees = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let Some(cell) = first_header_cell(row) else {
            continue;
        };
        let Some(header) = parse_header(cell, row) else {
            continue;
        };

        let year = match header.period_year {
            Some(year) => year,
            None => {
                warn!(
                    sheet = sheet_name,
                    row = index + 1,
                    employee = %header.name,
                    fallback_year = settings.fallback_year,
                    "No period year in header, using fallback year"
                );
                settings.fallback_year
            }
        };

        let attendance = scan_attendance_table(
            rows,
            index.saturating_add(settings.table_row_offset),
            year,
            settings.lookahead_rows,
        );
        debug!(
            sheet = sheet_name,
            row = index + 1,
            employee = %header.name,
            records = attendance.len(),
            "Extracted employee block"
        );

        employees.push(Employee::from_header(header, sheet_name, index + 1, attendance));
    }

    employees
}

/// Extracts employees from every sheet of a workbook, in sheet order.
pub fn extract_from_workbook(workbook: &Workbook, settings: &ExtractionSettings) -> Vec<Employee> {
    let employees: Vec<Employee> = workbook
        .sheets
        .iter()
        .flat_map(|sheet| extract_from_grid(&sheet.rows, &sheet.name, settings))
        .collect();

    info!(
        sheets = workbook.sheets.len(),
        employees = employees.len(),
        records = employees.iter().map(|e| e.attendance.len()).sum::<usize>(),
        "Extracted workbook"
    );

    employees
}

fn first_header_cell(row: &[Cell]) -> Option<&str> {
    row.iter()
        .filter_map(Cell::as_text)
        .find(|text| is_header_cell(text))
}
