//! Holiday set model.
//!
//! Holidays are kept as ISO `YYYY-MM-DD` strings. The core only ever asks whether a
//! date string is a member; editing the set is left to the owner of the store.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A set of holiday dates keyed by their `YYYY-MM-DD` rendering.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::models::HolidaySet;
///
/// let holidays = HolidaySet::from_dates(["2025-06-06"]).unwrap();
/// assert!(holidays.contains("2025-06-06"));
/// assert!(!holidays.contains("2025-06-07"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    dates: BTreeSet<String>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from date strings, rejecting any that are not `YYYY-MM-DD`.
    pub fn from_dates<I, S>(dates: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for date in dates {
            set.insert(date.as_ref())?;
        }
        Ok(set)
    }

    /// Normalizes a `YYYY-MM-DD` date to the form the set stores.
    pub fn canonicalize(date: &str) -> EngineResult<String> {
        canonical_date(date)
    }

    /// Returns true if the date string is a holiday.
    pub fn contains(&self, date: &str) -> bool {
        self.dates.contains(date)
    }

    /// Returns true if the calendar date is a holiday.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(&date.format("%Y-%m-%d").to_string())
    }

    /// Adds a holiday. Returns true if it was not already present.
    pub fn insert(&mut self, date: &str) -> EngineResult<bool> {
        let canonical = canonical_date(date)?;
        Ok(self.dates.insert(canonical))
    }

    /// Removes a holiday. Returns true if it was present; malformed dates never are.
    pub fn remove(&mut self, date: &str) -> bool {
        canonical_date(date).is_ok_and(|canonical| self.dates.remove(&canonical))
    }

    /// Flips a date's holiday status and returns the new status.
    pub fn toggle(&mut self, date: &str) -> EngineResult<bool> {
        let canonical = canonical_date(date)?;
        if self.dates.remove(&canonical) {
            Ok(false)
        } else {
            self.dates.insert(canonical);
            Ok(true)
        }
    }

    /// Returns the holidays falling in the given month, in date order.
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&str> {
        let prefix = format!("{:04}-{:02}-", year, month);
        self.dates
            .iter()
            .filter(|date| date.starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    /// Iterates over every holiday in date order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dates.iter().map(String::as_str)
    }

    /// Returns the number of holidays.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if there are no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

fn canonical_date(date: &str) -> EngineResult<String> {
    let trimmed = date.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|parsed| parsed.format("%Y-%m-%d").to_string())
        .map_err(|_| EngineError::InvalidHolidayDate {
            value: date.to_string(),
        })
}
