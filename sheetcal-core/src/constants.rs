/// Calendar name that always targets the user's own calendar.
pub const PRIMARY_CALENDAR_NAME: &str = "Primary";

/// Calendar id the service accepts for the authenticated user's own calendar.
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Length of a timed event whose row has no end time.
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

// Fixed column headers of the input table.
pub const COL_SUMMARY: &str = "Summary";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_START_DATE: &str = "Start Date";
pub const COL_START_TIME: &str = "Start Time";
pub const COL_END_DATE: &str = "End Date";
pub const COL_END_TIME: &str = "End Time";
pub const COL_START_TIME_ZONE: &str = "Start Time Zone";
pub const COL_END_TIME_ZONE: &str = "End Time Zone";
pub const COL_CALENDAR_NAME: &str = "Calendar Name";
