//! HTTP API module for the attendance engine.
//!
//! This module exposes extraction, import, statistics and holiday editing over REST.
//! All handlers share one [`AppState`] whose store is mutated by one request at a time.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MonthQuery, SummaryQuery, ToggleHolidayRequest, UploadRequest};
pub use response::{
    ApiError, ApiErrorResponse, EmployeeStats, ExtractResponse, HolidaysResponse,
    ToggleHolidayResponse,
};
pub use state::AppState;
