//! CSV tables.

use std::io::Read;

use super::{Cell, TableRow, rows_from_cells};
use crate::error::SheetCalResult;

/// Read rows from any CSV source with a header line.
///
/// Cells are decoded one by one, so a cell that isn't UTF-8 (a Windows-1252
/// export, say) rejects only its own row.
pub fn read_rows<R: Read>(source: R) -> SheetCalResult<Vec<TableRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut records = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record?;
        // Records, not lines: a quoted cell may span several lines.
        records.push((idx + 2, record.iter().map(decode).collect()));
    }

    rows_from_cells(&headers, records)
}

fn decode(bytes: &[u8]) -> Cell {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cell::text(text),
        Err(_) => Cell::Unreadable(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetCalError;
    use crate::row::RawRow;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn numbers(rows: &[TableRow]) -> Vec<usize> {
        rows.iter().map(|r| r.number).collect()
    }

    #[test]
    fn reads_typed_cells() {
        let csv = "\
Summary,Description,Start Date,Start Time,End Date,End Time,Start Time Zone,End Time Zone,Calendar Name
Standup,Daily,2024-03-01,09:00,,09:15,,,Work
Vacation,,2024-03-04,,2024-03-08,,,,
";

        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].number, 2);
        let standup = rows[0].cells.as_ref().unwrap();
        assert_eq!(standup.summary.as_deref(), Some("Standup"));
        assert_eq!(standup.start_time, Some(time(9, 0)));
        assert_eq!(standup.end_time, Some(time(9, 15)));
        assert_eq!(standup.end_date, None);
        assert_eq!(standup.start_time_zone, None);
        assert_eq!(standup.calendar_name.as_deref(), Some("Work"));

        let vacation = rows[1].cells.as_ref().unwrap();
        assert_eq!(vacation.description, None);
        assert_eq!(vacation.start_date, Some(date(2024, 3, 4)));
        assert_eq!(vacation.end_date, Some(date(2024, 3, 8)));
        assert_eq!(vacation.start_time, None);
    }

    #[test]
    fn missing_optional_columns_read_as_blank() {
        let rows = read_rows("Start Date,Notes\n2024-03-01,ignored\n".as_bytes()).unwrap();

        let row = rows[0].cells.as_ref().unwrap();
        assert_eq!(row, &RawRow::on(date(2024, 3, 1)));
    }

    #[test]
    fn missing_start_date_column_is_an_error() {
        let err = read_rows("Summary,Start Time\nLunch,12:00\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SheetCalError::MissingColumn(ref c) if c == "Start Date"));
    }

    #[test]
    fn bad_cell_only_fails_its_row() {
        let csv = "Start Date,Start Time\n2024-03-01,soon\n2024-03-02,10:00\n";

        let rows = read_rows(csv.as_bytes()).unwrap();

        assert!(matches!(
            rows[0].cells,
            Err(SheetCalError::InvalidCell { ref column, ref value })
                if column == "Start Time" && value == "soon"
        ));
        assert!(rows[1].cells.is_ok());
    }

    #[test]
    fn non_utf8_cell_only_fails_its_row() {
        let csv: &[u8] = b"Summary,Start Date\nCaf\xE9,2024-03-01\nOk,2024-03-02\n";

        let rows = read_rows(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(matches!(
            rows[0].cells,
            Err(SheetCalError::InvalidCell { ref column, .. }) if column == "Summary"
        ));
        assert_eq!(rows[1].cells.as_ref().unwrap().summary.as_deref(), Some("Ok"));
    }

    #[test]
    fn empty_lines_are_skipped_and_numbers_track_sheet_rows() {
        let csv = "Start Date,Summary\n2024-03-01,A\n,\n2024-03-03,C\n";

        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(numbers(&rows), vec![2, 4]);
    }

    #[test]
    fn multi_line_cell_is_still_one_row() {
        let csv = concat!(
            "Summary,Description,Start Date\n",
            "A,\"line1\nline2\nline3\",2024-03-01\n",
            "B,,2024-03-02\n",
        );

        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(numbers(&rows), vec![2, 3]);
        assert_eq!(
            rows[0].cells.as_ref().unwrap().description.as_deref(),
            Some("line1\nline2\nline3")
        );
    }

    #[test]
    fn blank_start_date_cell_is_kept_for_the_resolver() {
        let rows = read_rows("Summary,Start Date\nNo date,\n".as_bytes()).unwrap();

        let row = rows[0].cells.as_ref().unwrap();
        assert_eq!(row.start_date, None);
        assert_eq!(row.summary.as_deref(), Some("No date"));
    }
}
