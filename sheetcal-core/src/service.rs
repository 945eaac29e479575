//! The seam between the pipeline and a remote calendar service.

use crate::directory::CalendarListEntry;
use crate::error::SheetCalResult;
use crate::event::{CreatedEvent, ResolvedEvent};

/// Operations sheetcal needs from a calendar provider.
///
/// Calls are awaited one at a time; implementations report every failure as
/// [`SheetCalError::RemoteService`](crate::error::SheetCalError::RemoteService)
/// and never retry.
#[allow(async_fn_in_trait)]
pub trait CalendarService {
    /// All calendars visible to the account, whatever the access role.
    async fn list_calendars(&self) -> SheetCalResult<Vec<CalendarListEntry>>;

    /// The account's configured time zone (IANA name).
    async fn default_timezone(&self) -> SheetCalResult<String>;

    /// Insert one event into `event.calendar_id()`.
    async fn create_event(&self, event: &ResolvedEvent) -> SheetCalResult<CreatedEvent>;
}
