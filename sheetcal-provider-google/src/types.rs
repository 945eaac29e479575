//! Calendar v3 API request and response bodies.
//!
//! Only the fields sheetcal reads or writes are modelled.

use serde::{Deserialize, Serialize};
use sheetcal_core::AccessRole;

/// Body of `events.insert`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleEvent {
    pub summary: String,
    pub description: String,
    pub start: GoogleEventTime,
    pub end: GoogleEventTime,
}

/// Start or end of an event: `{"date": ...}` for all-day events,
/// `{"dateTime": ..., "timeZone": ...}` for timed ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GoogleEventTime {
    Date {
        date: String,
    },
    DateTime {
        #[serde(rename = "dateTime")]
        date_time: String,
        #[serde(rename = "timeZone")]
        time_zone: String,
    },
}

/// Response of `events.insert`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCreatedEvent {
    pub id: String,
    #[serde(default)]
    pub html_link: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One page of `calendarList.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendarList {
    #[serde(default)]
    pub items: Vec<GoogleCalendarListEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendarListEntry {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    pub access_role: AccessRole,
}

/// Response of `settings.get`.
#[derive(Debug, Deserialize)]
pub struct GoogleSetting {
    pub value: String,
}
