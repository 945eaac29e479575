use sheetcal_core::{ResolvedEvent, ResolvedSchedule};

use crate::types::{GoogleEvent, GoogleEventTime};

/// Wall-clock format without offset; the zone travels in `timeZone`.
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait ToGoogle {
    fn to_google(&self) -> GoogleEvent;
}

impl ToGoogle for ResolvedEvent {
    fn to_google(&self) -> GoogleEvent {
        let (start, end) = schedule_to_google(self.schedule());

        GoogleEvent {
            summary: self.summary().to_string(),
            description: self.description().to_string(),
            start,
            end,
        }
    }
}

fn schedule_to_google(schedule: &ResolvedSchedule) -> (GoogleEventTime, GoogleEventTime) {
    match schedule {
        ResolvedSchedule::AllDay { start, end } => (
            GoogleEventTime::Date {
                date: start.format(DATE_FORMAT).to_string(),
            },
            GoogleEventTime::Date {
                date: end.format(DATE_FORMAT).to_string(),
            },
        ),
        ResolvedSchedule::Timed {
            start,
            start_time_zone,
            end,
            end_time_zone,
        } => (
            GoogleEventTime::DateTime {
                date_time: start.format(DATE_TIME_FORMAT).to_string(),
                time_zone: start_time_zone.clone(),
            },
            GoogleEventTime::DateTime {
                date_time: end.format(DATE_TIME_FORMAT).to_string(),
                time_zone: end_time_zone.clone(),
            },
        ),
    }
}
