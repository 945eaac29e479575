//! Terminal rendering of plans and submission reports.
//!
//! Core types get colored output through the [`Render`] extension trait.

use std::collections::HashMap;

use owo_colors::OwoColorize;
use sheetcal_core::{Plan, PlannedRow, ResolvedEvent, ResolvedSchedule, RowOutcome, RowStatus};

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

pub fn render_header(account: &str, rows: usize) -> String {
    format!(
        "📅 {} {}",
        account,
        format!("({} {})", rows, pluralize("row", rows)).dimmed()
    )
}

/// Row number to event summary, for labelling outcomes after the plan is consumed.
pub fn plan_summaries(plan: &Plan) -> HashMap<usize, String> {
    plan.events()
        .map(|(number, event)| (number, display_summary(event).to_string()))
        .collect()
}

impl Render for PlannedRow {
    fn render(&self) -> String {
        match &self.event {
            Ok(event) => format!(
                "{} {} {} {}",
                row_label(self.number),
                display_summary(event).green(),
                event.schedule().render().dimmed(),
                format!("→ {}", event.calendar_id()).dimmed()
            ),
            Err(e) => format!("{} {}", row_label(self.number), e.to_string().red()),
        }
    }
}

impl Render for RowStatus {
    fn render(&self) -> String {
        match self {
            RowStatus::Created(_) => "+".green().to_string(),
            RowStatus::Failed(_) => "!".red().to_string(),
            RowStatus::Skipped => "-".yellow().to_string(),
        }
    }
}

/// One report line; `summary` comes from [`plan_summaries`].
pub fn render_outcome(outcome: &RowOutcome, summary: &str) -> String {
    let label = row_label(outcome.number);
    let symbol = outcome.status.render();
    match &outcome.status {
        RowStatus::Created(created) => {
            let link = created.html_link.as_deref().unwrap_or(&created.id);
            format!("{} {} {} {}", label, symbol, summary.green(), link.dimmed())
        }
        RowStatus::Failed(e) => format!("{} {} {}", label, symbol, e.to_string().red()),
        RowStatus::Skipped => format!("{} {} {}", label, symbol, "skipped".yellow()),
    }
}

impl Render for ResolvedSchedule {
    fn render(&self) -> String {
        match self {
            ResolvedSchedule::AllDay { start, end } if start == end => start.to_string(),
            ResolvedSchedule::AllDay { start, end } => format!("{} → {}", start, end),
            ResolvedSchedule::Timed {
                start,
                start_time_zone,
                end,
                end_time_zone,
            } => {
                let start_text = start.format("%Y-%m-%d %H:%M");
                let end_text = if end.date() == start.date() {
                    end.format("%H:%M").to_string()
                } else {
                    end.format("%Y-%m-%d %H:%M").to_string()
                };
                if start_time_zone == end_time_zone {
                    format!("{} → {} ({})", start_text, end_text, start_time_zone)
                } else {
                    format!(
                        "{} ({}) → {} ({})",
                        start_text, start_time_zone, end_text, end_time_zone
                    )
                }
            }
        }
    }
}

fn display_summary(event: &ResolvedEvent) -> &str {
    if event.summary().is_empty() {
        "(No title)"
    } else {
        event.summary()
    }
}

fn row_label(number: usize) -> String {
    format!("{:>5}", format!("#{}", number)).dimmed().to_string()
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
