//! Column-level defaults applied before date resolution.

use chrono::{NaiveDate, NaiveTime};

use crate::constants::PRIMARY_CALENDAR_NAME;
use crate::row::{RawRow, non_blank};

/// A [`RawRow`] with its text defaults filled in.
///
/// Only the date/time fields can still be blank; Start Date is checked later
/// by the schedule resolver because it is the only mandatory field.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub summary: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
    pub start_time_zone: String,
    pub end_time_zone: String,
    pub calendar_name: String,
}

impl NormalizedRow {
    /// Fill blank text fields. Never fails.
    pub fn from_raw(raw: RawRow, default_timezone: &str) -> Self {
        NormalizedRow {
            summary: non_blank(raw.summary).unwrap_or_default(),
            description: non_blank(raw.description).unwrap_or_default(),
            start_date: raw.start_date,
            start_time: raw.start_time,
            end_date: raw.end_date,
            end_time: raw.end_time,
            start_time_zone: time_zone_or(raw.start_time_zone, default_timezone),
            end_time_zone: time_zone_or(raw.end_time_zone, default_timezone),
            calendar_name: non_blank(raw.calendar_name)
                .unwrap_or_else(|| PRIMARY_CALENDAR_NAME.to_string()),
        }
    }
}

/// IANA names never contain spaces, so stray padding is dropped.
fn time_zone_or(cell: Option<String>, default_timezone: &str) -> String {
    non_blank(cell)
        .map(|tz| tz.trim().to_string())
        .unwrap_or_else(|| default_timezone.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn blank_fields_get_defaults() {
        let row = NormalizedRow::from_raw(RawRow::on(date(2024, 3, 1)), "Europe/Berlin");

        assert_eq!(row.description, "");
        assert_eq!(row.summary, "");
        assert_eq!(row.start_time_zone, "Europe/Berlin");
        assert_eq!(row.end_time_zone, "Europe/Berlin");
        assert_eq!(row.calendar_name, "Primary");
    }

    #[test]
    fn explicit_values_are_kept() {
        let raw = RawRow {
            summary: Some("Standup".into()),
            description: Some("Daily sync".into()),
            start_time_zone: Some("America/New_York".into()),
            end_time_zone: Some("America/Chicago".into()),
            calendar_name: Some("Work".into()),
            ..RawRow::on(date(2024, 3, 1))
        };

        let row = NormalizedRow::from_raw(raw, "Europe/Berlin");

        assert_eq!(row.summary, "Standup");
        assert_eq!(row.description, "Daily sync");
        assert_eq!(row.start_time_zone, "America/New_York");
        assert_eq!(row.end_time_zone, "America/Chicago");
        assert_eq!(row.calendar_name, "Work");
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let raw = RawRow {
            calendar_name: Some("   ".into()),
            end_time_zone: Some("".into()),
            ..RawRow::on(date(2024, 3, 1))
        };

        let row = NormalizedRow::from_raw(raw, "UTC");

        assert_eq!(row.calendar_name, "Primary");
        assert_eq!(row.end_time_zone, "UTC");
    }

    #[test]
    fn text_is_kept_as_written() {
        let raw = RawRow {
            summary: Some(" Standup ".into()),
            calendar_name: Some("Work ".into()),
            start_time_zone: Some(" Europe/Paris ".into()),
            ..RawRow::on(date(2024, 3, 1))
        };

        let row = NormalizedRow::from_raw(raw, "UTC");

        assert_eq!(row.summary, " Standup ");
        assert_eq!(row.calendar_name, "Work ");
        assert_eq!(row.start_time_zone, "Europe/Paris");
    }

    #[test]
    fn date_fields_pass_through_untouched() {
        let raw = RawRow {
            start_date: None,
            end_date: Some(date(2024, 3, 3)),
            ..Default::default()
        };

        let row = NormalizedRow::from_raw(raw, "UTC");

        assert_eq!(row.start_date, None);
        assert_eq!(row.end_date, Some(date(2024, 3, 3)));
        assert_eq!(row.start_time, None);
    }
}
