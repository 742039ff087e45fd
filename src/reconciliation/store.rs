//! The caller-owned attendance store.
//!
//! [`AttendanceStore`] holds the reconciled employee list and the holiday set that
//! extraction, merging and statistics operate on. Imports must be applied one at a
//! time; the store is a plain value and leaves that discipline to its owner.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::merge::{MergeReport, merge_into};
use crate::config::ExtractionSettings;
use crate::error::{EngineError, EngineResult};
use crate::extraction::extract_from_workbook;
use crate::models::{Employee, HolidaySet, Workbook};

/// The outcome of importing one upload into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Sheets scanned.
    pub sheets: usize,
    /// Employee blocks extracted across all sheets.
    pub employees_extracted: usize,
    /// What the merge changed.
    pub merge: MergeReport,
    /// Employees in the store after the import.
    pub total_employees: usize,
}

/// Reconciled employees plus the holidays used for statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceStore {
    #[serde(default)]
    employees: Vec<Employee>,
    #[serde(default)]
    holidays: HolidaySet,
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store seeded with holidays.
    pub fn with_holidays(holidays: HolidaySet) -> Self {
        Self {
            employees: Vec::new(),
            holidays,
        }
    }

    /// Returns the reconciled employees.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Finds an employee by name, ignoring case.
    ///
    /// Two employees may share a name under different IDs; passing `employee_id`
    /// selects between them. Without it the first match in store order wins.
    pub fn find_employee(&self, name: &str, employee_id: Option<&str>) -> EngineResult<&Employee> {
        let wanted = name.trim().to_lowercase();
        let employee_id = employee_id.map(str::trim);
        self.employees
            .iter()
            .filter(|e| e.name.to_lowercase() == wanted)
            .find(|e| employee_id.is_none_or(|id| e.employee_id == id))
            .ok_or_else(|| EngineError::EmployeeNotFound {
                name: match employee_id {
                    Some(id) => format!("{name} (ID {id})"),
                    None => name.to_string(),
                },
            })
    }

    /// Returns the holiday set.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Returns the holiday set for editing.
    pub fn holidays_mut(&mut self) -> &mut HolidaySet {
        &mut self.holidays
    }

    /// Merges already-extracted employees into the store.
    pub fn merge(&mut self, incoming: Vec<Employee>) -> MergeReport {
        merge_into(&mut self.employees, incoming)
    }

    /// Extracts every sheet of an upload and merges the result into the store.
    ///
    /// Returns [`EngineError::NoAttendanceData`] and leaves the store untouched when no
    /// sheet contains an employee block.
    pub fn import(
        &mut self,
        workbook: &Workbook,
        settings: &ExtractionSettings,
    ) -> EngineResult<ImportReport> {
        let extracted = extract_from_workbook(workbook, settings);
        if extracted.is_empty() {
            return Err(EngineError::NoAttendanceData {
                sheets: workbook.sheets.len(),
            });
        }

        let employees_extracted = extracted.len();
        let merge = self.merge(extracted);

        info!(
            employees_extracted,
            employees_added = merge.employees_added,
            employees_updated = merge.employees_updated,
            records_added = merge.records_added,
            records_skipped = merge.records_skipped,
            "Imported upload"
        );

        Ok(ImportReport {
            sheets: workbook.sheets.len(),
            employees_extracted,
            merge,
            total_employees: self.employees.len(),
        })
    }

    /// Removes every employee and holiday.
    pub fn clear(&mut self) {
        self.employees.clear();
        self.holidays = HolidaySet::new();
    }
}
