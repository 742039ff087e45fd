//! Response types for the attendance API.
//!
//! This module defines the success bodies that are not plain domain types, the error
//! body, and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Employee, MonthKey};

/// Response body for `/extract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Employee blocks found, in sheet and row order.
    pub employees: Vec<Employee>,
    /// Attendance records across all employees.
    pub total_records: usize,
}

/// Working and present day counts for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStats {
    /// Employee name.
    pub name: String,
    /// Employee ID, possibly empty.
    pub employee_id: String,
    /// Department, possibly empty.
    pub department: String,
    /// Records on working days.
    pub working_days: usize,
    /// Working-day records with a morning clock-in.
    pub present_days: usize,
}

/// Response body for `/holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidaysResponse {
    /// Holiday dates, ascending.
    pub holidays: Vec<String>,
    /// The month filter, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthKey>,
    /// Non-holiday weekdays of the filtered month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_days: Option<usize>,
}

/// Response body for `/holidays/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleHolidayResponse {
    /// The canonical date that was toggled.
    pub date: String,
    /// Whether the date is a holiday after the toggle.
    pub is_holiday: bool,
    /// Number of holidays after the toggle.
    pub total_holidays: usize,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidFallbackYear { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_FALLBACK_YEAR", message),
            },
            EngineError::InvalidHolidayDate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_HOLIDAY_DATE", message),
            },
            EngineError::InvalidMonth { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_MONTH", message),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::NoAttendanceData { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "NO_ATTENDANCE_DATA",
                    message,
                    "No cell containing 'Name:' was found in the upload",
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_engine_error_status_codes() {
        let cases = [
            (
                EngineError::NoAttendanceData { sheets: 2 },
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_ATTENDANCE_DATA",
            ),
            (
                EngineError::InvalidMonth {
                    value: "June".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_MONTH",
            ),
            (
                EngineError::InvalidFallbackYear { year: 25 },
                StatusCode::BAD_REQUEST,
                "INVALID_FALLBACK_YEAR",
            ),
            (
                EngineError::InvalidHolidayDate {
                    value: "10/06/2025".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_HOLIDAY_DATE",
            ),
            (
                EngineError::EmployeeNotFound {
                    name: "Nobody".to_string(),
                },
                StatusCode::NOT_FOUND,
                "EMPLOYEE_NOT_FOUND",
            ),
            (
                EngineError::ConfigNotFound {
                    path: "/missing".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (engine_error, status, code) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_message_carries_engine_error_text() {
        let api_error: ApiErrorResponse = EngineError::EmployeeNotFound {
            name: "Nobody".to_string(),
        }
        .into();
        assert_eq!(api_error.error.message, "Employee not found: Nobody");
    }
}
