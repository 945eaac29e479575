pub mod check;
pub mod import;

use std::path::Path;

use anyhow::{Context, Result};
use sheetcal_core::{Plan, RunContext, table};
use sheetcal_provider_google::GoogleCalendar;
use tracing::debug;

use crate::utils::tui::create_spinner;

/// Connect, fetch the run context, then load and resolve every row.
/// Nothing is sent to the calendar yet.
pub async fn prepare(
    file: &Path,
    sheet: Option<&str>,
    account: Option<&str>,
) -> Result<(GoogleCalendar, Plan)> {
    let spinner = create_spinner("Connecting to Google Calendar".to_string());
    let connected = connect(account).await;
    spinner.finish_and_clear();
    let (service, context) = connected?;

    let rows = table::load(file, sheet)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let plan = Plan::build(rows, &context);
    debug!(
        rows = plan.rows().len(),
        rejected = plan.rejected_count(),
        "plan ready"
    );

    Ok((service, plan))
}

async fn connect(account: Option<&str>) -> Result<(GoogleCalendar, RunContext)> {
    let service = GoogleCalendar::connect(account).await?;
    let context = RunContext::fetch(&service)
        .await
        .with_context(|| format!("Failed to load calendars for {}", service.account()))?;
    Ok((service, context))
}
