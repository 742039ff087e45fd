//! Extraction of employee records from a decoded spreadsheet grid.
//!
//! This module contains the time cell normalizer, the header cell parser, the
//! attendance table scanner and the extractor that ties them together across sheets.
//! Every step is best-effort: malformed cells and rows are skipped, never reported as
//! failures.

mod extractor;
mod header;
mod table;
mod time_cell;

pub use extractor::{extract_from_grid, extract_from_workbook};
pub use header::{
    DATE_MARKER, DEPT_MARKER, ID_MARKER, NAME_MARKER, SUPPLEMENTARY_NAME_COLUMNS,
    is_header_cell, parse_header, parse_period,
};
pub use table::{
    DAY_BLOCK_WIDTH, DEFAULT_LOOKAHEAD_ROWS, DayBlock, LEFT_DAY, RIGHT_DAY, parse_date_label,
    scan_attendance_table,
};
pub use time_cell::extract_time;
