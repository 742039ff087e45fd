//! Error types for the attendance engine.
//!
//! Extraction, merging and statistics never fail: malformed input only yields fewer
//! records. The errors below come from the edges of the crate, where configuration is
//! loaded and caller-supplied values are validated.

use thiserror::Error;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/extraction.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/extraction.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value outside its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending setting.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An upload asked for a fallback year outside the accepted range.
    #[error("Invalid fallback year {year}: expected 1900-2999")]
    InvalidFallbackYear {
        /// The rejected year.
        year: i32,
    },

    /// A holiday was given in something other than `YYYY-MM-DD` form.
    #[error("Invalid holiday date '{value}': expected YYYY-MM-DD")]
    InvalidHolidayDate {
        /// The rejected value.
        value: String,
    },

    /// A month key was given in something other than `YYYY-MM` form.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected value.
        value: String,
    },

    /// No employee with the requested name exists in the store.
    #[error("Employee not found: {name}")]
    EmployeeNotFound {
        /// The requested name.
        name: String,
    },

    /// An upload contained no employee header on any sheet.
    #[error("No attendance data found in {sheets} sheet(s)")]
    NoAttendanceData {
        /// Number of sheets that were scanned.
        sheets: usize,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
