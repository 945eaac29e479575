use sheetcal_core::{CalendarListEntry, CreatedEvent};

use crate::types::{GoogleCalendarListEntry, GoogleCreatedEvent};

pub trait FromGoogle<T> {
    fn from_google(value: T) -> Self;
}

impl FromGoogle<GoogleCalendarListEntry> for CalendarListEntry {
    fn from_google(cal: GoogleCalendarListEntry) -> Self {
        CalendarListEntry {
            display_name: cal.summary,
            id: cal.id,
            access_role: cal.access_role,
        }
    }
}

impl FromGoogle<GoogleCreatedEvent> for CreatedEvent {
    fn from_google(event: GoogleCreatedEvent) -> Self {
        CreatedEvent {
            id: event.id,
            html_link: event.html_link,
            status: event.status,
        }
    }
}
