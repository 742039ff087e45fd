//! HTTP request handlers for the attendance API.
//!
//! This module contains the handler functions for all API endpoints. Every request
//! gets a correlation ID that is attached to its log lines.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DailyPresence, MonthlySummary, available_months, calendar_working_days, daily_presence,
    monthly_summary, present_days_count, records_in_month, working_days_count,
};
use crate::error::EngineError;
use crate::extraction::extract_from_workbook;
use crate::models::{AttendanceRecord, Employee, HolidaySet, MonthKey};
use crate::reconciliation::ImportReport;

use super::request::{MonthQuery, SummaryQuery, ToggleHolidayRequest, UploadRequest};
use super::response::{
    ApiError, ApiErrorResponse, EmployeeStats, ExtractResponse, HolidaysResponse,
    ToggleHolidayResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/extract", post(extract_handler))
        .route("/import", post(import_handler))
        .route("/employees", get(employees_handler))
        .route("/employees/stats", get(employee_stats_handler))
        .route("/employees/:name/summary", get(employee_summary_handler))
        .route("/months", get(months_handler))
        .route("/holidays", get(holidays_handler))
        .route("/holidays/toggle", post(toggle_holiday_handler))
        .route("/analysis/daily", get(daily_presence_handler))
        .with_state(state)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Logs an engine error and maps it to its HTTP response.
fn engine_error(error: EngineError, correlation_id: Uuid) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    error.into()
}

fn parse_month(
    query: &MonthQuery,
    correlation_id: Uuid,
) -> Result<Option<MonthKey>, ApiErrorResponse> {
    query.month().map_err(|err| engine_error(err, correlation_id))
}

/// Handler for POST /extract.
///
/// Extracts every employee block from an upload without touching the store.
async fn extract_handler(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> ApiResult<ExtractResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing extract request");

    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;
    let settings = request
        .settings(state.config().extraction())
        .map_err(|err| engine_error(err, correlation_id))?;
    let workbook = request.into_workbook();

    let start_time = Instant::now();
    let employees = extract_from_workbook(&workbook, &settings);
    if employees.is_empty() {
        return Err(engine_error(
            EngineError::NoAttendanceData {
                sheets: workbook.sheets.len(),
            },
            correlation_id,
        ));
    }

    let total_records = employees.iter().map(|e| e.attendance.len()).sum();
    info!(
        correlation_id = %correlation_id,
        employees = employees.len(),
        total_records,
        duration_us = start_time.elapsed().as_micros(),
        "Extraction completed successfully"
    );

    Ok(Json(ExtractResponse {
        employees,
        total_records,
    }))
}

/// Handler for POST /import.
///
/// Extracts an upload and merges it into the store.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> ApiResult<ImportReport> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing import request");

    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;
    let settings = request
        .settings(state.config().extraction())
        .map_err(|err| engine_error(err, correlation_id))?;
    let workbook = request.into_workbook();

    let start_time = Instant::now();
    let mut store = state.store().lock().await;
    let report = store
        .import(&workbook, &settings)
        .map_err(|err| engine_error(err, correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        total_employees = report.total_employees,
        records_added = report.merge.records_added,
        duration_us = start_time.elapsed().as_micros(),
        "Import completed successfully"
    );
    Ok(Json(report))
}

/// Handler for GET /employees.
async fn employees_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    let store = state.store().lock().await;
    Json(store.employees().to_vec())
}

fn employee_stats(
    employee: &Employee,
    month: Option<MonthKey>,
    holidays: &HolidaySet,
) -> EmployeeStats {
    let records: Vec<AttendanceRecord> = match month {
        Some(month) => records_in_month(&employee.attendance, month)
            .into_iter()
            .cloned()
            .collect(),
        None => employee.attendance.clone(),
    };

    EmployeeStats {
        name: employee.name.clone(),
        employee_id: employee.employee_id.clone(),
        department: employee.department.clone(),
        working_days: working_days_count(&records, holidays),
        present_days: present_days_count(&records, holidays),
    }
}

/// Handler for GET /employees/stats.
///
/// Returns working and present day counts per employee, optionally for one month.
async fn employee_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Vec<EmployeeStats>> {
    let correlation_id = Uuid::new_v4();
    let month = parse_month(&query, correlation_id)?;

    let store = state.store().lock().await;
    let stats = store
        .employees()
        .iter()
        .map(|employee| employee_stats(employee, month, store.holidays()))
        .collect();
    Ok(Json(stats))
}

/// Handler for GET /employees/:name/summary.
///
/// Without a month, the employee's latest month with data is summarised. `?id=`
/// picks between employees who share a name.
async fn employee_summary_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<MonthlySummary> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee = %name,
        employee_id = query.employee_id().unwrap_or(""),
        "Processing summary request"
    );
    let month = parse_month(&query.month_query(), correlation_id)?;

    let store = state.store().lock().await;
    let employee = store
        .find_employee(&name, query.employee_id())
        .map_err(|err| engine_error(err, correlation_id))?;

    let month = match month {
        Some(month) => month,
        None => available_months(std::slice::from_ref(employee))
            .last()
            .copied()
            .ok_or_else(|| {
                ApiErrorResponse::bad_request(ApiError::validation_error(format!(
                    "Employee '{}' has no attendance; a month must be given",
                    employee.name
                )))
            })?,
    };

    let summary = monthly_summary(
        employee,
        month,
        store.holidays(),
        state.config().policy().late_after,
    );
    Ok(Json(summary))
}

/// Handler for GET /months.
async fn months_handler(State(state): State<AppState>) -> Json<Vec<MonthKey>> {
    let store = state.store().lock().await;
    Json(available_months(store.employees()))
}

/// Handler for GET /holidays.
///
/// With a month, only that month's holidays are listed along with its working days.
async fn holidays_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<HolidaysResponse> {
    let correlation_id = Uuid::new_v4();
    let month = parse_month(&query, correlation_id)?;

    let store = state.store().lock().await;
    let holidays = store.holidays();
    let response = match month {
        Some(month) => HolidaysResponse {
            holidays: holidays
                .in_month(month.year, month.month)
                .into_iter()
                .map(str::to_string)
                .collect(),
            month: Some(month),
            working_days: Some(calendar_working_days(month, holidays)),
        },
        None => HolidaysResponse {
            holidays: holidays.iter().map(str::to_string).collect(),
            month: None,
            working_days: None,
        },
    };
    Ok(Json(response))
}

/// Handler for POST /holidays/toggle.
async fn toggle_holiday_handler(
    State(state): State<AppState>,
    payload: Result<Json<ToggleHolidayRequest>, JsonRejection>,
) -> ApiResult<ToggleHolidayResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;

    let date = HolidaySet::canonicalize(&request.date)
        .map_err(|err| engine_error(err, correlation_id))?;

    let mut store = state.store().lock().await;
    let is_holiday = store
        .holidays_mut()
        .toggle(&date)
        .map_err(|err| engine_error(err, correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        date = %date,
        is_holiday,
        "Holiday toggled"
    );
    Ok(Json(ToggleHolidayResponse {
        date,
        is_holiday,
        total_holidays: store.holidays().len(),
    }))
}

/// Handler for GET /analysis/daily.
async fn daily_presence_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Vec<DailyPresence>> {
    let correlation_id = Uuid::new_v4();
    let month = parse_month(&query, correlation_id)?;

    let store = state.store().lock().await;
    Ok(Json(daily_presence(store.employees(), month, store.holidays())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::DayStatus;
    use crate::config::ConfigLoader;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use rust_decimal::Decimal;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn upload_body() -> serde_json::Value {
        json!({
            "sheets": [{
                "name": "June",
                "rows": [
                    ["Dept:Prefects Name:Jane Doe ID:17 Date:25.06.01~25.06.30"],
                    ["Date", "Week", "Morning", null, "Afternoon"],
                    [null, null, "In", "Out", "In", "Out"],
                    ["06.02", "MON", "06:40", "12:00", null, null, null, null, "06.03", "TUE", "06:50", "12:01"],
                    ["06.07", "SAT", "07:10", "12:00"],
                    ["06.10", "TUE", "06:30", "12:00"]
                ]
            }]
        })
    }

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.oneshot(request).await.unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_extract_returns_employees() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/extract", Some(upload_body())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: ExtractResponse = read_json(response).await;
        assert_eq!(result.employees.len(), 1);
        assert_eq!(result.employees[0].name, "Jane Doe");
        assert_eq!(result.employees[0].department, "Prefects");
        assert_eq!(result.total_records, 4);
    }

    #[tokio::test]
    async fn test_extract_does_not_touch_store() {
        let state = create_test_state();
        let response = send(create_router(state.clone()), "POST", "/extract", Some(upload_body())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.store().lock().await.employees().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/import")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_sheets_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/import", Some(json!({ "fallback_year": 2025 }))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("sheets"));
    }

    #[tokio::test]
    async fn test_upload_without_headers_returns_422() {
        let router = create_router(create_test_state());
        let body = json!({ "sheets": [{ "name": "Notes", "rows": [["hello"]] }] });
        let response = send(router, "POST", "/import", Some(body)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "NO_ATTENDANCE_DATA");
    }

    #[tokio::test]
    async fn test_out_of_range_fallback_year_returns_400() {
        let state = create_test_state();
        let body = json!({
            "sheets": [{
                "name": "June",
                "rows": [
                    ["Name:Jane Doe ID:17"],
                    [],
                    [],
                    ["06.02", "MON", "06:40", "12:00"],
                    ["06.03", "TUE", "06:50", "12:00"]
                ]
            }],
            "fallback_year": 300000
        });
        let response = send(create_router(state.clone()), "POST", "/import", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_FALLBACK_YEAR");
        assert!(state.store().lock().await.employees().is_empty());
    }

    #[tokio::test]
    async fn test_import_then_list_employees() {
        let state = create_test_state();
        let response = send(create_router(state.clone()), "POST", "/import", Some(upload_body())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let report: ImportReport = read_json(response).await;
        assert_eq!(report.merge.employees_added, 1);
        assert_eq!(report.merge.records_added, 4);

        let response = send(create_router(state), "GET", "/employees", None).await;
        let employees: Vec<Employee> = read_json(response).await;
        assert_eq!(employees.len(), 1);
        let labels: Vec<&str> = employees[0]
            .attendance
            .iter()
            .map(|r| r.date_label.as_str())
            .collect();
        assert_eq!(labels, vec!["06.02", "06.03", "06.07", "06.10"]);
    }

    #[tokio::test]
    async fn test_stats_respect_holidays() {
        let state = create_test_state();
        send(create_router(state.clone()), "POST", "/import", Some(upload_body())).await;

        // 2025-06-10 is a configured holiday; 06.07 is SAT
        let response = send(create_router(state), "GET", "/employees/stats?month=2025-06", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let stats: Vec<EmployeeStats> = read_json(response).await;
        assert_eq!(stats[0].working_days, 2);
        assert_eq!(stats[0].present_days, 2);
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/employees/stats?month=June", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_summary_for_employee() {
        let state = create_test_state();
        send(create_router(state.clone()), "POST", "/import", Some(upload_body())).await;

        let response = send(
            create_router(state),
            "GET",
            "/employees/jane%20doe/summary?month=2025-06",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let summary: MonthlySummary = read_json(response).await;
        assert_eq!(summary.employee, "Jane Doe");
        assert_eq!(summary.working_days, 20);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.attendance_rate, Decimal::from(10));
        assert_eq!(summary.days[9].status, DayStatus::Holiday);
    }

    #[tokio::test]
    async fn test_summary_defaults_to_latest_month() {
        let state = create_test_state();
        send(create_router(state.clone()), "POST", "/import", Some(upload_body())).await;

        let response = send(create_router(state), "GET", "/employees/Jane%20Doe/summary", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary: MonthlySummary = read_json(response).await;
        assert_eq!(summary.month, MonthKey::new(2025, 6).unwrap());
    }

    #[tokio::test]
    async fn test_summary_selects_employee_by_id() {
        let state = create_test_state();
        let body = json!({
            "sheets": [{
                "name": "June",
                "rows": [
                    ["Name:Jane Doe ID:17 Date:25.06.01~25.06.30"],
                    [],
                    [],
                    ["06.02", "MON", "06:40", "12:00"],
                    ["Name:Jane Doe ID:18 Date:25.06.01~25.06.30"],
                    [],
                    [],
                    ["06.02", "MON", "07:30", "12:00"],
                    ["06.03", "TUE", "07:30", "12:00"]
                ]
            }]
        });
        send(create_router(state.clone()), "POST", "/import", Some(body)).await;

        let response = send(
            create_router(state.clone()),
            "GET",
            "/employees/Jane%20Doe/summary?month=2025-06&id=18",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary: MonthlySummary = read_json(response).await;
        assert_eq!(summary.employee_id, "18");
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.late_days, 2);

        let response = send(
            create_router(state),
            "GET",
            "/employees/Jane%20Doe/summary?month=2025-06&id=99",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summary_unknown_employee_returns_404() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/employees/Nobody/summary?month=2025-06", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_months_catalogue() {
        let state = create_test_state();
        send(create_router(state.clone()), "POST", "/import", Some(upload_body())).await;

        let response = send(create_router(state), "GET", "/months", None).await;
        let months: Vec<MonthKey> = read_json(response).await;
        assert_eq!(months, vec![MonthKey::new(2025, 6).unwrap()]);
    }

    #[tokio::test]
    async fn test_toggle_holiday_round_trip() {
        let state = create_test_state();

        let body = json!({ "date": "2025-6-3" });
        let response = send(create_router(state.clone()), "POST", "/holidays/toggle", Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let toggled: ToggleHolidayResponse = read_json(response).await;
        assert_eq!(toggled.date, "2025-06-03");
        assert!(toggled.is_holiday);

        let response = send(create_router(state.clone()), "GET", "/holidays?month=2025-06", None).await;
        let holidays: HolidaysResponse = read_json(response).await;
        assert_eq!(holidays.holidays, vec!["2025-06-03", "2025-06-10"]);
        assert_eq!(holidays.working_days, Some(19));

        let body = json!({ "date": "2025-06-03" });
        let response = send(create_router(state), "POST", "/holidays/toggle", Some(body)).await;
        let toggled: ToggleHolidayResponse = read_json(response).await;
        assert!(!toggled.is_holiday);
    }

    #[tokio::test]
    async fn test_toggle_invalid_date_returns_400() {
        let router = create_router(create_test_state());
        let body = json!({ "date": "10/06/2025" });
        let response = send(router, "POST", "/holidays/toggle", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_HOLIDAY_DATE");
    }

    #[tokio::test]
    async fn test_daily_presence() {
        let state = create_test_state();
        send(create_router(state.clone()), "POST", "/import", Some(upload_body())).await;

        let response = send(create_router(state), "GET", "/analysis/daily?month=2025-06", None).await;
        let presence: Vec<DailyPresence> = read_json(response).await;
        let labels: Vec<(&str, usize)> = presence
            .iter()
            .map(|p| (p.date_label.as_str(), p.count))
            .collect();
        assert_eq!(labels, vec![("06.02", 1), ("06.03", 1)]);
    }
}
