//! Spreadsheet workbooks (xlsx, xls, ods) read with calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use super::{Cell, TableRow, rows_from_cells};
use crate::constants::COL_START_DATE;
use crate::error::{SheetCalError, SheetCalResult};

/// Read the named sheet of a workbook, or its first sheet.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> SheetCalResult<Vec<TableRow>> {
    let mut workbook = open_workbook_auto(path)?;

    let name = pick_sheet(workbook.sheet_names(), sheet)?;
    debug!(sheet = %name, "reading worksheet");

    let range = workbook.worksheet_range(&name)?;
    read_range(&range)
}

fn pick_sheet(names: Vec<String>, sheet: Option<&str>) -> SheetCalResult<String> {
    match sheet {
        Some(wanted) => names
            .into_iter()
            .find(|name| name == wanted)
            .ok_or_else(|| SheetCalError::Table(format!("No sheet named '{}'", wanted))),
        None => names
            .into_iter()
            .next()
            .ok_or_else(|| SheetCalError::Table("Workbook has no sheets".into())),
    }
}

/// The first row of the used range is the header.
fn read_range(range: &Range<Data>) -> SheetCalResult<Vec<TableRow>> {
    // Zero-based sheet row of the header; the used range may start below row 1.
    let header_row = range.start().map_or(0, |(row, _)| row as usize);

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(SheetCalError::MissingColumn(COL_START_DATE.to_string()));
    };
    let headers: Vec<String> = header.iter().map(|h| h.to_string()).collect();

    let records = rows
        .enumerate()
        .map(|(idx, cells)| (header_row + idx + 2, cells.iter().map(cell).collect()));

    rows_from_cells(&headers, records)
}

fn cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Blank,
        Data::String(text) => Cell::text(text),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Unreadable(data.to_string())),
        Data::Error(_) => Cell::Unreadable(data.to_string()),
        other => Cell::text(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sheet(start: (u32, u32), cells: &[&[Data]]) -> Range<Data> {
        let width = cells[0].len() as u32;
        let end = (start.0 + cells.len() as u32 - 1, start.1 + width - 1);
        let mut range = Range::new(start, end);

        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((start.0 + r as u32, start.1 + c as u32), value.clone());
            }
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    // --- read_range ---

    #[test]
    fn excel_dates_and_times_become_typed_cells() {
        // 45352 is 2024-03-01; .5 is noon.
        let serial =
            |v: f64| Data::DateTime(ExcelDateTime::new(v, ExcelDateTimeType::DateTime, false));

        let range = sheet(
            (0, 0),
            &[
                &[text("Summary"), text("Start Date"), text("Start Time")],
                &[text("Lunch"), serial(45352.0), serial(0.5)],
            ],
        );

        let rows = read_range(&range).unwrap();
        let lunch = rows[0].cells.as_ref().unwrap();

        assert_eq!(rows[0].number, 2);
        assert_eq!(lunch.summary.as_deref(), Some("Lunch"));
        assert_eq!(lunch.start_date, Some(date(2024, 3, 1)));
        assert_eq!(lunch.start_time, NaiveTime::from_hms_opt(12, 0, 0));
    }

    #[test]
    fn text_dates_in_a_workbook_still_parse() {
        let range = sheet(
            (0, 0),
            &[
                &[text("Start Date"), text("Start Time")],
                &[text("3/1/24"), Data::DateTimeIso("14:30:00".into())],
            ],
        );

        let rows = read_range(&range).unwrap();
        let row = rows[0].cells.as_ref().unwrap();

        assert_eq!(row.start_date, Some(date(2024, 3, 1)));
        assert_eq!(row.start_time, NaiveTime::from_hms_opt(14, 30, 0));
    }

    #[test]
    fn row_numbers_follow_the_sheet_when_range_starts_lower() {
        let range = sheet(
            (2, 1),
            &[
                &[text("Start Date"), text("Summary")],
                &[text("2024-03-01"), text("A")],
                &[Data::Empty, Data::Empty],
                &[text("2024-03-03"), text("C")],
            ],
        );

        let rows = read_range(&range).unwrap();

        let numbers: Vec<usize> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![4, 6]);
    }

    #[test]
    fn error_cells_reject_their_row() {
        let range = sheet(
            (0, 0),
            &[
                &[text("Start Date"), text("Calendar Name")],
                &[text("2024-03-01"), Data::Error(calamine::CellErrorType::Ref)],
            ],
        );

        let rows = read_range(&range).unwrap();

        assert!(matches!(
            rows[0].cells,
            Err(SheetCalError::InvalidCell { ref column, .. }) if column == "Calendar Name"
        ));
    }

    #[test]
    fn empty_sheet_has_no_start_date_column() {
        let range: Range<Data> = Range::empty();

        assert!(matches!(
            read_range(&range),
            Err(SheetCalError::MissingColumn(_))
        ));
    }

    // --- pick_sheet ---

    #[test]
    fn picks_named_or_first_sheet() {
        let names = || vec!["Spring".to_string(), "Autumn".to_string()];

        assert_eq!(pick_sheet(names(), None).unwrap(), "Spring");
        assert_eq!(pick_sheet(names(), Some("Autumn")).unwrap(), "Autumn");
        assert!(matches!(pick_sheet(names(), Some("Winter")), Err(SheetCalError::Table(_))));
        assert!(matches!(pick_sheet(Vec::new(), None), Err(SheetCalError::Table(_))));
    }
}
