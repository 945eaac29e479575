use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sheetcal_provider_google::convert::ToGoogle;

use crate::render::{self, Render};

pub async fn run(file: &Path, sheet: Option<&str>, account: Option<&str>) -> Result<()> {
    let (service, plan) = super::prepare(file, sheet, account).await?;

    println!("{}", render::render_header(service.account(), plan.rows().len()));

    for row in plan.rows() {
        println!("{}", row.render());

        if let Ok(event) = &row.event {
            let body = serde_json::to_string_pretty(&event.to_google())
                .context("Failed to serialize event")?;
            println!(
                "   {} {}",
                "POST".dimmed(),
                format!("calendars/{}/events", event.calendar_id()).dimmed()
            );
            for line in body.lines() {
                println!("   {}", line.dimmed());
            }
        }
    }

    let rejected = plan.rejected_count();
    if rejected > 0 {
        anyhow::bail!(
            "{} {} would be rejected",
            rejected,
            render::pluralize("row", rejected)
        );
    }

    println!("\nAll {} rows are ready to import", plan.rows().len());
    Ok(())
}
