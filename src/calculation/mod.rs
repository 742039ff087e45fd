//! Attendance statistics.
//!
//! This module contains the holiday-aware business-day counts, per-day status and
//! lateness classification, monthly summaries per employee, daily headcounts and the
//! month catalogue.

mod business_days;
mod daily_presence;
mod day_status;
mod monthly_summary;
mod months;

pub use business_days::{
    calendar_working_days, is_holiday, is_working_day, present_days_count, working_days_count,
};
pub use daily_presence::{DailyPresence, daily_presence};
pub use day_status::{DayStatus, classify_day, is_late, parse_clock_time};
pub use monthly_summary::{DaySummary, MonthlySummary, attendance_rate, monthly_summary};
pub use months::{available_months, records_in_month};
