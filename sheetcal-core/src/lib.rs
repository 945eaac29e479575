//! Core types for sheetcal.
//!
//! This crate turns loosely specified spreadsheet rows into fully specified
//! calendar events and submits them through a [`service::CalendarService`]:
//! - `row` / `table` for the raw rows and the CSV loader that produces them
//! - `normalize`, `schedule`, `directory`, `event` for the resolution pipeline
//! - `submit` for the validation pre-pass and row-by-row submission

pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod event;
pub mod normalize;
pub mod row;
pub mod schedule;
pub mod service;
pub mod submit;
pub mod table;

pub use directory::{AccessRole, CalendarDirectory, CalendarListEntry};
pub use error::{SheetCalError, SheetCalResult};
pub use event::{CreatedEvent, ResolvedEvent};
pub use normalize::NormalizedRow;
pub use row::RawRow;
pub use schedule::ResolvedSchedule;
pub use service::CalendarService;
pub use submit::{
    FailurePolicy, Plan, PlannedRow, RowOutcome, RowStatus, RunContext, SubmissionReport,
};
