//! Calendar display name to calendar id lookup.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::constants::{PRIMARY_CALENDAR_ID, PRIMARY_CALENDAR_NAME};
use crate::error::{SheetCalError, SheetCalResult};

/// The user's access level on a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessRole {
    Owner,
    Writer,
    Reader,
    FreeBusyReader,
}

impl AccessRole {
    pub fn can_write(self) -> bool {
        matches!(self, AccessRole::Owner | AccessRole::Writer)
    }
}

/// A calendar as listed by the calendar service.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarListEntry {
    pub display_name: String,
    pub id: String,
    pub access_role: AccessRole,
}

/// Writable calendars by display name, fetched once per run.
#[derive(Debug, Clone)]
pub struct CalendarDirectory {
    ids_by_name: HashMap<String, String>,
}

impl CalendarDirectory {
    /// Keep only calendars the user can write to, then pin "Primary" to the
    /// user's own calendar even if a calendar is literally named "Primary".
    pub fn from_entries(entries: impl IntoIterator<Item = CalendarListEntry>) -> Self {
        let mut ids_by_name: HashMap<String, String> = entries
            .into_iter()
            .filter(|entry| entry.access_role.can_write())
            .map(|entry| (entry.display_name, entry.id))
            .collect();

        ids_by_name.insert(
            PRIMARY_CALENDAR_NAME.to_string(),
            PRIMARY_CALENDAR_ID.to_string(),
        );

        debug!(calendars = ids_by_name.len(), "built calendar directory");

        CalendarDirectory { ids_by_name }
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.ids_by_name.get(name).map(String::as_str)
    }

    /// Like [`resolve`](Self::resolve), but an unknown name is an error.
    pub fn require(&self, name: &str) -> SheetCalResult<&str> {
        self.resolve(name)
            .ok_or_else(|| SheetCalError::UnresolvedCalendarName(name.to_string()))
    }

    /// Number of writable calendars, "Primary" included.
    pub fn len(&self) -> usize {
        self.ids_by_name.len()
    }
}
