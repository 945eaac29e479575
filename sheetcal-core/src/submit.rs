//! Validation pre-pass and row-by-row submission.
//!
//! Every row is resolved locally first ([`Plan::build`]), so malformed rows
//! and unknown calendar names are reported before anything is sent. The plan
//! is then submitted strictly in row order, one event at a time.

use tracing::{debug, info, warn};

use crate::directory::CalendarDirectory;
use crate::error::{SheetCalError, SheetCalResult};
use crate::event::{CreatedEvent, ResolvedEvent};
use crate::normalize::NormalizedRow;
use crate::row::RawRow;
use crate::schedule::ResolvedSchedule;
use crate::service::CalendarService;
use crate::table::TableRow;

/// Values fetched once per run and shared read-only by every row.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub default_timezone: String,
    pub directory: CalendarDirectory,
}

impl RunContext {
    /// Fetch the account's time zone and calendar directory.
    pub async fn fetch<S: CalendarService>(service: &S) -> SheetCalResult<Self> {
        let default_timezone = service.default_timezone().await?;
        let calendars = service.list_calendars().await?;
        let listed = calendars.len();
        let directory = CalendarDirectory::from_entries(calendars);
        debug!(
            %default_timezone,
            listed,
            writable = directory.len(),
            "fetched run context"
        );

        Ok(RunContext {
            default_timezone,
            directory,
        })
    }

    /// Turn one raw row into a finished event. Pure: depends only on the row
    /// and this context.
    pub fn resolve_row(&self, raw: RawRow) -> SheetCalResult<ResolvedEvent> {
        let row = NormalizedRow::from_raw(raw, &self.default_timezone);

        let schedule = ResolvedSchedule::resolve(&row)?;
        schedule.validate_time_zones()?;
        let calendar_id = self.directory.require(&row.calendar_name)?;

        Ok(ResolvedEvent::new(
            row.summary,
            row.description,
            schedule,
            calendar_id,
        ))
    }
}

/// What to do once a row fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Submit nothing if any row is rejected locally, and stop at the first
    /// remote failure.
    #[default]
    AbortOnFirstFailure,
    /// Submit every valid row and record each failure.
    KeepGoing,
}

/// A row after the pre-pass.
#[derive(Debug)]
pub struct PlannedRow {
    pub number: usize,
    pub event: SheetCalResult<ResolvedEvent>,
}

/// Every row of a table, resolved or rejected, in table order.
#[derive(Debug)]
pub struct Plan {
    rows: Vec<PlannedRow>,
}

impl Plan {
    pub fn build(rows: Vec<TableRow>, context: &RunContext) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                let event = row.cells.and_then(|raw| context.resolve_row(raw));
                if let Err(e) = &event {
                    warn!(row = row.number, "rejected: {}", e);
                }
                PlannedRow {
                    number: row.number,
                    event,
                }
            })
            .collect();

        Plan { rows }
    }

    pub fn rows(&self) -> &[PlannedRow] {
        &self.rows
    }

    pub fn rejected_count(&self) -> usize {
        self.rows.iter().filter(|r| r.event.is_err()).count()
    }

    pub fn is_valid(&self) -> bool {
        self.rejected_count() == 0
    }

    /// The events that passed the pre-pass.
    pub fn events(&self) -> impl Iterator<Item = (usize, &ResolvedEvent)> {
        self.rows
            .iter()
            .filter_map(|r| r.event.as_ref().ok().map(|e| (r.number, e)))
    }

    /// Submit each valid row in order under `policy`.
    pub async fn submit<S: CalendarService>(
        self,
        service: &S,
        policy: FailurePolicy,
    ) -> SubmissionReport {
        let mut aborted = policy == FailurePolicy::AbortOnFirstFailure && !self.is_valid();
        if aborted {
            info!(
                rejected = self.rejected_count(),
                "not submitting: some rows were rejected"
            );
        }

        let mut outcomes = Vec::with_capacity(self.rows.len());

        for row in self.rows {
            let status = match row.event {
                Err(e) => RowStatus::Failed(e),
                Ok(_) if aborted => RowStatus::Skipped,
                Ok(event) => {
                    debug!(row = row.number, calendar = event.calendar_id(), "submitting");
                    match service.create_event(&event).await {
                        Ok(created) => {
                            info!(row = row.number, id = %created.id, "created event");
                            RowStatus::Created(created)
                        }
                        Err(e) => {
                            warn!(row = row.number, "submission failed: {}", e);
                            if policy == FailurePolicy::AbortOnFirstFailure {
                                aborted = true;
                            }
                            RowStatus::Failed(e)
                        }
                    }
                }
            };

            outcomes.push(RowOutcome {
                number: row.number,
                status,
            });
        }

        SubmissionReport { outcomes }
    }
}

/// How one row ended up.
#[derive(Debug)]
pub enum RowStatus {
    Created(CreatedEvent),
    Failed(SheetCalError),
    /// Not submitted because the run was aborted.
    Skipped,
}

#[derive(Debug)]
pub struct RowOutcome {
    pub number: usize,
    pub status: RowStatus,
}

/// Per-row results, in table order.
#[derive(Debug)]
pub struct SubmissionReport {
    pub outcomes: Vec<RowOutcome>,
}

impl SubmissionReport {
    /// (created, failed, skipped)
    pub fn counts(&self) -> (usize, usize, usize) {
        self.outcomes
            .iter()
            .fold((0, 0, 0), |(c, f, s), o| match o.status {
                RowStatus::Created(_) => (c + 1, f, s),
                RowStatus::Failed(_) => (c, f + 1, s),
                RowStatus::Skipped => (c, f, s + 1),
            })
    }

    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.status, RowStatus::Created(_)))
    }
}
