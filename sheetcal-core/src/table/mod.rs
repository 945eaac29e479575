//! Tabular loader producing [`RawRow`]s.
//!
//! A file reference is either a spreadsheet workbook (`.xlsx`, `.xlsm`,
//! `.xlsb`, `.xls`, `.ods`), where the sheet selector names the sheet and the
//! first sheet is the default, or a CSV file, which has exactly one table.

mod delimited;
mod workbook;

use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::constants::*;
use crate::error::{SheetCalError, SheetCalResult};
use crate::row::RawRow;

pub use delimited::read_rows;
pub use workbook::read_workbook;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M",
    "%H:%M:%S",
    "%I:%M %p",
    "%I:%M%p",
    "%I:%M:%S %p",
];

/// A loaded row and its spreadsheet row number (the header is row 1).
///
/// A row with an unreadable cell keeps its error so it can be rejected
/// alongside the other rows instead of aborting the whole load.
#[derive(Debug)]
pub struct TableRow {
    pub number: usize,
    pub cells: SheetCalResult<RawRow>,
}

/// Load every row of the selected sheet.
pub fn load(path: &Path, sheet: Option<&str>) -> SheetCalResult<Vec<TableRow>> {
    debug!(path = %path.display(), ?sheet, "loading table");

    if is_workbook(path) {
        return read_workbook(path, sheet);
    }

    if let Some(sheet) = sheet {
        return Err(SheetCalError::Table(format!(
            "Cannot select sheet '{}': {} is a CSV file with a single table",
            sheet,
            path.display()
        )));
    }

    read_rows(File::open(path)?)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// One cell as read from either format.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Blank,
    Text(String),
    /// A workbook cell stored as a date, time or datetime.
    DateTime(NaiveDateTime),
    /// Bytes that aren't text, or a workbook error value like `#REF!`.
    Unreadable(String),
}

impl Cell {
    fn text(value: &str) -> Self {
        if value.trim().is_empty() {
            Cell::Blank
        } else {
            Cell::Text(value.to_string())
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }
}

/// Column positions found in the header.
struct Columns {
    summary: Option<usize>,
    description: Option<usize>,
    start_date: usize,
    start_time: Option<usize>,
    end_date: Option<usize>,
    end_time: Option<usize>,
    start_time_zone: Option<usize>,
    end_time_zone: Option<usize>,
    calendar_name: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &[String]) -> SheetCalResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };

        Ok(Columns {
            summary: find(COL_SUMMARY),
            description: find(COL_DESCRIPTION),
            start_date: find(COL_START_DATE)
                .ok_or_else(|| SheetCalError::MissingColumn(COL_START_DATE.to_string()))?,
            start_time: find(COL_START_TIME),
            end_date: find(COL_END_DATE),
            end_time: find(COL_END_TIME),
            start_time_zone: find(COL_START_TIME_ZONE),
            end_time_zone: find(COL_END_TIME_ZONE),
            calendar_name: find(COL_CALENDAR_NAME),
        })
    }

    fn row(&self, cells: &[Cell]) -> SheetCalResult<RawRow> {
        static BLANK: Cell = Cell::Blank;
        let cell = |idx: Option<usize>| idx.and_then(|i| cells.get(i)).unwrap_or(&BLANK);

        Ok(RawRow {
            summary: text_cell(COL_SUMMARY, cell(self.summary))?,
            description: text_cell(COL_DESCRIPTION, cell(self.description))?,
            start_date: date_cell(COL_START_DATE, cell(Some(self.start_date)))?,
            start_time: time_cell(COL_START_TIME, cell(self.start_time))?,
            end_date: date_cell(COL_END_DATE, cell(self.end_date))?,
            end_time: time_cell(COL_END_TIME, cell(self.end_time))?,
            start_time_zone: text_cell(COL_START_TIME_ZONE, cell(self.start_time_zone))?,
            end_time_zone: text_cell(COL_END_TIME_ZONE, cell(self.end_time_zone))?,
            calendar_name: text_cell(COL_CALENDAR_NAME, cell(self.calendar_name))?,
        })
    }
}

/// Turn numbered rows of cells into [`TableRow`]s. Fully blank rows are
/// padding, not events, and are dropped.
fn rows_from_cells(
    headers: &[String],
    records: impl IntoIterator<Item = (usize, Vec<Cell>)>,
) -> SheetCalResult<Vec<TableRow>> {
    let columns = Columns::from_headers(headers)?;

    let rows: Vec<TableRow> = records
        .into_iter()
        .filter(|(_, cells)| !cells.iter().all(Cell::is_blank))
        .map(|(number, cells)| TableRow {
            number,
            cells: columns.row(&cells),
        })
        .collect();

    debug!(rows = rows.len(), "read table");
    Ok(rows)
}

fn text_cell(column: &str, cell: &Cell) -> SheetCalResult<Option<String>> {
    match cell {
        Cell::Blank => Ok(None),
        Cell::Text(text) => Ok(Some(text.clone())),
        Cell::DateTime(dt) => Ok(Some(dt.to_string())),
        Cell::Unreadable(raw) => Err(invalid(column, raw)),
    }
}

fn date_cell(column: &str, cell: &Cell) -> SheetCalResult<Option<NaiveDate>> {
    match cell {
        Cell::Blank => Ok(None),
        Cell::DateTime(dt) => Ok(Some(dt.date())),
        Cell::Text(text) => parse_date(text.trim())
            .map(Some)
            .ok_or_else(|| invalid(column, text)),
        Cell::Unreadable(raw) => Err(invalid(column, raw)),
    }
}

fn time_cell(column: &str, cell: &Cell) -> SheetCalResult<Option<NaiveTime>> {
    match cell {
        Cell::Blank => Ok(None),
        Cell::DateTime(dt) => Ok(Some(dt.time())),
        Cell::Text(text) => parse_time(text.trim())
            .map(Some)
            .ok_or_else(|| invalid(column, text)),
        Cell::Unreadable(raw) => Err(invalid(column, raw)),
    }
}

fn invalid(column: &str, value: &str) -> SheetCalError {
    SheetCalError::InvalidCell {
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Parse a date cell; spreadsheet datetime exports keep only their date.
/// Two-digit years ("3/1/24") land in 1970-2069.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
        .or_else(|| parse_datetime(text).map(|dt| dt.date()))
}

/// Parse a time-of-day cell.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(text, f).ok())
        .or_else(|| parse_hour_only(text))
        .or_else(|| parse_datetime(text).map(|dt| dt.time()))
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
}

/// "3pm", "11 AM"
fn parse_hour_only(text: &str) -> Option<NaiveTime> {
    let upper = text.to_ascii_uppercase();
    let (digits, pm) = match upper.strip_suffix("PM") {
        Some(digits) => (digits, true),
        None => (upper.strip_suffix("AM")?, false),
    };

    let hour: u32 = digits.trim().parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = hour % 12 + if pm { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour, 0, 0)
}
