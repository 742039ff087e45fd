//! Time cell normalization.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Cell;

static TIME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}:[0-9]{2})").expect("valid time pattern"));

/// Normalizes a clock cell to its leading `H:MM`/`HH:MM` token.
///
/// Trailing annotations such as the `*` the clock adds to manually corrected punches
/// are dropped. Cells that do not start with a time yield `None`; nothing here fails.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::extraction::extract_time;
/// use fingerprint_attendance::models::Cell;
///
/// assert_eq!(extract_time(&Cell::from("07:07*")), Some("07:07".to_string()));
/// assert_eq!(extract_time(&Cell::from("")), None);
/// assert_eq!(extract_time(&Cell::from("N/A")), None);
/// ```
pub fn extract_time(cell: &Cell) -> Option<String> {
    let text = cell.to_text();
    TIME_TOKEN
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|token| token.as_str().to_string())
}

/// Looks up a cell by column and normalizes it; missing columns yield `None`.
pub(crate) fn time_at(row: &[Cell], column: usize) -> Option<String> {
    row.get(column).and_then(extract_time)
}
