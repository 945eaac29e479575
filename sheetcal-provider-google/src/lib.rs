//! sheetcal-provider-google - Google Calendar provider for sheetcal
//!
//! Implements [`sheetcal_core::CalendarService`] on top of the Calendar v3
//! REST API. The provider manages its own credentials and sessions:
//!   ~/.config/sheetcal/providers/google/app_config.toml
//!   ~/.config/sheetcal/providers/google/session/{account}.toml

mod api;
pub mod app_config;
pub mod convert;
pub mod session;
pub mod types;

pub use api::GoogleCalendar;
