//! Resolution of a row's date/time cells into a concrete schedule.

use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;
use tracing::trace;

use crate::constants::{COL_START_DATE, DEFAULT_EVENT_DURATION_MINUTES};
use crate::error::{SheetCalError, SheetCalResult};
use crate::normalize::NormalizedRow;

/// When an event happens.
///
/// Timed instants are wall-clock values; the time zone names travel next to
/// them as metadata and are never used to shift the instant.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSchedule {
    AllDay {
        start: NaiveDate,
        end: NaiveDate,
    },
    Timed {
        start: NaiveDateTime,
        start_time_zone: String,
        end: NaiveDateTime,
        end_time_zone: String,
    },
}

impl ResolvedSchedule {
    /// Resolve a normalized row. First matching rule wins:
    ///
    /// 1. no Start Date: error
    /// 2. no Start Time: all-day, ending on End Date or else the start date
    /// 3. no End Time: timed, one hour long (End Date is ignored)
    /// 4. End Time without End Date: timed, ending on the start date
    /// 5. End Time and End Date: timed, ending at that date and time
    ///
    /// Start and end are not compared; an end before the start is passed on.
    pub fn resolve(row: &NormalizedRow) -> SheetCalResult<Self> {
        let start_date = row
            .start_date
            .ok_or_else(|| SheetCalError::MissingRequiredField(COL_START_DATE.to_string()))?;

        let Some(start_time) = row.start_time else {
            let end = row.end_date.unwrap_or(start_date);
            trace!(%start_date, %end, "resolved all-day schedule");
            return Ok(ResolvedSchedule::AllDay {
                start: start_date,
                end,
            });
        };

        let start = combine(start_date, start_time);

        let end = match (row.end_time, row.end_date) {
            (None, _) => start + Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES),
            (Some(end_time), None) => combine(start_date, end_time),
            (Some(end_time), Some(end_date)) => combine(end_date, end_time),
        };

        trace!(%start, %end, "resolved timed schedule");

        Ok(ResolvedSchedule::Timed {
            start,
            start_time_zone: row.start_time_zone.clone(),
            end,
            end_time_zone: row.end_time_zone.clone(),
        })
    }

    /// Check that every time zone the schedule carries is a known IANA name.
    /// All-day schedules carry none.
    pub fn validate_time_zones(&self) -> SheetCalResult<()> {
        if let ResolvedSchedule::Timed {
            start_time_zone,
            end_time_zone,
            ..
        } = self
        {
            for tz in [start_time_zone, end_time_zone] {
                Tz::from_str(tz).map_err(|_| SheetCalError::InvalidTimeZone(tz.clone()))?;
            }
        }
        Ok(())
    }
}

/// Date plus hour and minute of the time cell; seconds are dropped.
fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    let minute_precision = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
    date.and_time(minute_precision)
}
