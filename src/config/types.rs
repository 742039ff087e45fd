//! Configuration types for attendance extraction and statistics.
//!
//! The file structures are deserialized from YAML; the settings structures are what the
//! rest of the crate consumes once the files have been validated.

use std::ops::RangeInclusive;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::extraction::DEFAULT_LOOKAHEAD_ROWS;
use crate::models::HolidaySet;

/// Rows between a header cell and the first table row (header row, legend rows).
pub const DEFAULT_TABLE_ROW_OFFSET: usize = 3;

/// Years accepted as a fallback year, from config or an upload override.
pub const FALLBACK_YEAR_RANGE: RangeInclusive<i32> = 1900..=2999;

/// Default latest on-time morning clock-in, as `HH:MM`.
pub const DEFAULT_LATE_AFTER: &str = "06:45";

/// Structure of `extraction.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionFile {
    /// Year applied to table labels when a header has no usable period. Required.
    pub fallback_year: i32,
    /// Rows from a header to its table.
    #[serde(default = "default_table_row_offset")]
    pub table_row_offset: usize,
    /// Maximum rows examined per table.
    #[serde(default = "default_lookahead_rows")]
    pub lookahead_rows: usize,
    /// Latest on-time morning clock-in.
    #[serde(default = "default_late_after")]
    pub late_after: String,
}

fn default_table_row_offset() -> usize {
    DEFAULT_TABLE_ROW_OFFSET
}

fn default_lookahead_rows() -> usize {
    DEFAULT_LOOKAHEAD_ROWS
}

fn default_late_after() -> String {
    DEFAULT_LATE_AFTER.to_string()
}

/// Structure of `holidays.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysFile {
    /// Holiday dates as `YYYY-MM-DD`.
    #[serde(default)]
    pub holidays: Vec<String>,
}

/// Settings that drive grid extraction.
///
/// There is no `Default`; the fallback year must be chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Year applied to table labels when a header has no usable period.
    pub fallback_year: i32,
    /// Rows from a header to its table.
    pub table_row_offset: usize,
    /// Maximum rows examined per table.
    pub lookahead_rows: usize,
}

impl ExtractionSettings {
    /// Creates settings with the given fallback year and the standard layout.
    pub fn new(fallback_year: i32) -> Self {
        Self {
            fallback_year,
            table_row_offset: DEFAULT_TABLE_ROW_OFFSET,
            lookahead_rows: DEFAULT_LOOKAHEAD_ROWS,
        }
    }
}

/// Rules used when classifying attendance days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// A morning clock-in strictly after this time is late.
    pub late_after: NaiveTime,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            late_after: NaiveTime::from_hms_opt(6, 45, 0).unwrap_or_default(),
        }
    }
}

/// The complete engine configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    extraction: ExtractionSettings,
    policy: AttendancePolicy,
    holidays: HolidaySet,
}

impl EngineConfig {
    /// Creates an EngineConfig from its component parts.
    pub fn new(
        extraction: ExtractionSettings,
        policy: AttendancePolicy,
        holidays: HolidaySet,
    ) -> Self {
        Self {
            extraction,
            policy,
            holidays,
        }
    }

    /// Returns the extraction settings.
    pub fn extraction(&self) -> &ExtractionSettings {
        &self.extraction
    }

    /// Returns the attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Returns the configured holidays the store starts with.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }
}
