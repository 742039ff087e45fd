//! Request types for the attendance API.
//!
//! Uploads arrive as already-decoded spreadsheet grids: one entry per sheet, each a
//! list of rows of JSON strings, numbers or nulls.

use serde::{Deserialize, Serialize};

use crate::config::{ExtractionSettings, FALLBACK_YEAR_RANGE};
use crate::error::{EngineError, EngineResult};
use crate::models::{MonthKey, Sheet, Workbook};

/// Request body for `/extract` and `/import`.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::api::UploadRequest;
///
/// let json = r#"{
///     "sheets": [{ "name": "June", "rows": [["Name:Jane ID:7"], ["06.02", "MON", "06:40"]] }],
///     "fallback_year": 2024
/// }"#;
/// let request: UploadRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.sheets.len(), 1);
/// assert_eq!(request.fallback_year, Some(2024));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// The sheets of the uploaded workbook, in order.
    pub sheets: Vec<Sheet>,
    /// Overrides the configured fallback year for this upload.
    #[serde(default)]
    pub fallback_year: Option<i32>,
}

impl UploadRequest {
    /// Applies this request's overrides to the configured extraction settings.
    ///
    /// An override outside 1900-2999 is rejected, since no table label could be dated
    /// with it.
    pub fn settings(&self, configured: &ExtractionSettings) -> EngineResult<ExtractionSettings> {
        let fallback_year = match self.fallback_year {
            Some(year) if !FALLBACK_YEAR_RANGE.contains(&year) => {
                return Err(EngineError::InvalidFallbackYear { year });
            }
            Some(year) => year,
            None => configured.fallback_year,
        };
        Ok(ExtractionSettings {
            fallback_year,
            ..configured.clone()
        })
    }

    /// Converts the request into a workbook.
    pub fn into_workbook(self) -> Workbook {
        Workbook {
            sheets: self.sheets,
        }
    }
}

/// Request body for `/holidays/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleHolidayRequest {
    /// The date to toggle, as `YYYY-MM-DD`.
    pub date: String,
}

/// Optional `?month=YYYY-MM` query parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    /// The requested month, unparsed.
    #[serde(default)]
    pub month: Option<String>,
}

impl MonthQuery {
    /// Parses the month parameter; blank values count as absent.
    pub fn month(&self) -> EngineResult<Option<MonthKey>> {
        match self.month.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

/// Query parameters for `/employees/:name/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// The requested month, unparsed.
    #[serde(default)]
    pub month: Option<String>,
    /// Selects between employees who share a name.
    #[serde(default)]
    pub id: Option<String>,
}

impl SummaryQuery {
    /// The month part of the query.
    pub fn month_query(&self) -> MonthQuery {
        MonthQuery {
            month: self.month.clone(),
        }
    }

    /// The employee ID, with blank values treated as absent.
    pub fn employee_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_override_fallback_year() {
        let configured = ExtractionSettings::new(2025);
        let request = UploadRequest {
            sheets: vec![],
            fallback_year: Some(2023),
        };
        let settings = request.settings(&configured).unwrap();
        assert_eq!(settings.fallback_year, 2023);
        assert_eq!(settings.lookahead_rows, configured.lookahead_rows);

        let request = UploadRequest {
            sheets: vec![],
            fallback_year: None,
        };
        assert_eq!(request.settings(&configured).unwrap().fallback_year, 2025);
    }

    #[test]
    fn test_settings_reject_out_of_range_fallback_year() {
        let configured = ExtractionSettings::new(2025);
        for year in [300000, 1899, 3000, -1] {
            let request = UploadRequest {
                sheets: vec![],
                fallback_year: Some(year),
            };
            match request.settings(&configured) {
                Err(EngineError::InvalidFallbackYear { year: rejected }) => assert_eq!(rejected, year),
                other => panic!("Expected InvalidFallbackYear, got {:?}", other),
            }
        }

        let edge = UploadRequest {
            sheets: vec![],
            fallback_year: Some(2999),
        };
        assert_eq!(edge.settings(&configured).unwrap().fallback_year, 2999);
    }

    #[test]
    fn test_month_query_parsing() {
        let query = MonthQuery {
            month: Some("2025-06".to_string()),
        };
        assert_eq!(query.month().unwrap(), MonthKey::new(2025, 6));

        assert_eq!(MonthQuery::default().month().unwrap(), None);
        let blank = MonthQuery {
            month: Some("  ".to_string()),
        };
        assert_eq!(blank.month().unwrap(), None);

        let bad = MonthQuery {
            month: Some("June".to_string()),
        };
        assert!(matches!(bad.month(), Err(EngineError::InvalidMonth { .. })));
    }

    #[test]
    fn test_summary_query_employee_id() {
        let query = SummaryQuery {
            month: Some("2025-06".to_string()),
            id: Some(" 17 ".to_string()),
        };
        assert_eq!(query.employee_id(), Some("17"));
        assert_eq!(query.month_query().month().unwrap(), MonthKey::new(2025, 6));

        let blank = SummaryQuery {
            month: None,
            id: Some(String::new()),
        };
        assert_eq!(blank.employee_id(), None);
    }
}
