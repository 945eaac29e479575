//! Conversions between sheetcal-core types and Calendar API bodies.

mod from_google;
mod to_google;

pub use from_google::FromGoogle;
pub use to_google::ToGoogle;
