//! Configuration loading and management for the attendance engine.
//!
//! This module loads extraction settings, the attendance policy and the initial holiday
//! set from YAML files in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use fingerprint_attendance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Lookahead: {} rows", config.extraction().lookahead_rows);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendancePolicy, DEFAULT_LATE_AFTER, DEFAULT_TABLE_ROW_OFFSET, EngineConfig, ExtractionFile,
    ExtractionSettings, FALLBACK_YEAR_RANGE, HolidaysFile,
};
