//! One event request as authored in the spreadsheet.

use chrono::{NaiveDate, NaiveTime};

/// A row of the input table.
///
/// Every field is optional; `None` means the cell was blank. Text cells that
/// only contain whitespace are stored as `None` by the loader, so a blank
/// cell never shows up as `Some("")`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
    pub start_time_zone: Option<String>,
    pub end_time_zone: Option<String>,
    pub calendar_name: Option<String>,
}

impl RawRow {
    /// Shorthand for a row that only has a start date.
    pub fn on(start_date: NaiveDate) -> Self {
        RawRow {
            start_date: Some(start_date),
            ..Default::default()
        }
    }
}

/// Treat empty and whitespace-only text as blank. Other text is kept as
/// written, so calendar names still match exactly.
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
