//! Reconciliation of repeated uploads.
//!
//! This module merges newly extracted employees into previously held ones and provides
//! the [`AttendanceStore`] that owns the result together with the holiday set.

mod merge;
mod store;

pub use merge::{MergeReport, merge_employees, merge_into, merge_records};
pub use store::{AttendanceStore, ImportReport};
