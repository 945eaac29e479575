//! Finished events ready for submission, and what the service returns.

use crate::schedule::ResolvedSchedule;

/// An event with everything the calendar service needs.
///
/// Built once per row and never modified; it has no id until the service
/// creates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEvent {
    summary: String,
    description: String,
    schedule: ResolvedSchedule,
    calendar_id: String,
}

impl ResolvedEvent {
    pub fn new(
        summary: impl Into<String>,
        description: impl Into<String>,
        schedule: ResolvedSchedule,
        calendar_id: impl Into<String>,
    ) -> Self {
        ResolvedEvent {
            summary: summary.into(),
            description: description.into(),
            schedule,
            calendar_id: calendar_id.into(),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schedule(&self) -> &ResolvedSchedule {
        &self.schedule
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }
}

/// The service's record of an event it created.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedEvent {
    pub id: String,
    pub html_link: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn builder_keeps_every_part() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let schedule = ResolvedSchedule::AllDay {
            start: day,
            end: day,
        };

        let event = ResolvedEvent::new("Launch", "", schedule.clone(), "primary");

        assert_eq!(event.summary(), "Launch");
        assert_eq!(event.description(), "");
        assert_eq!(event.schedule(), &schedule);
        assert_eq!(event.calendar_id(), "primary");
    }
}
