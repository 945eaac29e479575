use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use sheetcal_core::FailurePolicy;

use crate::render;
use crate::utils::tui::create_spinner;

pub async fn run(
    file: &Path,
    sheet: Option<&str>,
    account: Option<&str>,
    policy: FailurePolicy,
) -> Result<()> {
    let (service, plan) = super::prepare(file, sheet, account).await?;

    println!("{}", render::render_header(service.account(), plan.rows().len()));

    let spinner = create_spinner("Creating events".to_string());
    let summaries = render::plan_summaries(&plan);
    let report = plan.submit(&service, policy).await;
    spinner.finish_and_clear();

    for outcome in &report.outcomes {
        let summary = summaries
            .get(&outcome.number)
            .map(String::as_str)
            .unwrap_or_default();
        println!("{}", render::render_outcome(outcome, summary));
    }

    let (created, failed, skipped) = report.counts();
    println!(
        "\nCreated: {} {}, {} failed, {} skipped",
        created,
        render::pluralize("event", created),
        failed,
        skipped
    );

    if !report.is_success() {
        if skipped > 0 && policy == FailurePolicy::AbortOnFirstFailure {
            println!(
                "{}",
                "Stopped at the first failure. Use --keep-going to submit the remaining rows."
                    .dimmed()
            );
        }
        anyhow::bail!("{} of {} rows were not created", failed + skipped, report.outcomes.len());
    }

    Ok(())
}
