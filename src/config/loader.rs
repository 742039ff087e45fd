//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine configuration from
//! YAML files.

use chrono::NaiveTime;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::HolidaySet;

use super::types::{
    AttendancePolicy, EngineConfig, ExtractionFile, ExtractionSettings, FALLBACK_YEAR_RANGE,
    HolidaysFile,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── extraction.yaml   # fallback year, table layout, lateness threshold
/// └── holidays.yaml     # optional initial holiday dates
/// ```
///
/// # Example
///
/// ```no_run
/// use fingerprint_attendance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Fallback year: {}", loader.extraction().fallback_year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `extraction.yaml` is missing, any file contains invalid YAML,
    /// or a value fails validation. `holidays.yaml` may be absent.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let extraction_path = path.join("extraction.yaml");
        let extraction_file = Self::load_yaml::<ExtractionFile>(&extraction_path)?;

        let holidays_path = path.join("holidays.yaml");
        let holidays_file = if holidays_path.exists() {
            Self::load_yaml::<HolidaysFile>(&holidays_path)?
        } else {
            HolidaysFile::default()
        };

        let config = Self::validate(extraction_file, holidays_file)?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(extraction: ExtractionFile, holidays: HolidaysFile) -> EngineResult<EngineConfig> {
        if !FALLBACK_YEAR_RANGE.contains(&extraction.fallback_year) {
            return Err(EngineError::InvalidConfig {
                field: "fallback_year".to_string(),
                message: format!("{} is outside 1900-2999", extraction.fallback_year),
            });
        }

        if extraction.lookahead_rows == 0 {
            return Err(EngineError::InvalidConfig {
                field: "lookahead_rows".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let late_after = NaiveTime::parse_from_str(extraction.late_after.trim(), "%H:%M")
            .map_err(|_| EngineError::InvalidConfig {
                field: "late_after".to_string(),
                message: format!("'{}' is not an HH:MM time", extraction.late_after),
            })?;

        let holidays = HolidaySet::from_dates(&holidays.holidays)?;

        Ok(EngineConfig::new(
            ExtractionSettings {
                fallback_year: extraction.fallback_year,
                table_row_offset: extraction.table_row_offset,
                lookahead_rows: extraction.lookahead_rows,
            },
            AttendancePolicy { late_after },
            holidays,
        ))
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the extraction settings.
    pub fn extraction(&self) -> &ExtractionSettings {
        self.config.extraction()
    }

    /// Returns the attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        self.config.policy()
    }

    /// Returns the configured initial holidays.
    pub fn holidays(&self) -> &HolidaySet {
        self.config.holidays()
    }
}
