//! Core data models for the attendance engine.
//!
//! This module contains the grid types an upload is decoded into and the employee,
//! attendance and holiday types the engine produces and consumes.

mod attendance;
mod employee;
mod grid;
mod holiday;
mod month;

pub use attendance::{AttendanceRecord, SATURDAY_CODE, SUNDAY_CODE, ShiftTimes};
pub use employee::{Employee, EmployeeHeader};
pub use grid::{Cell, Row, Sheet, Workbook, row_text};
pub use holiday::HolidaySet;
pub use month::MonthKey;
