use colored::Colorize;

use crate::core::context::ReportContext;
use crate::core::result::{DayRecord, FetchResult};
use crate::reporters::traits::{ReportError, Reporter, ReporterConfig};

/// Context key under which the plain-text summary is published.
pub const CONSOLE_CONTEXT_KEY: &str = "CONSOLE";

/// Prints a per-day summary of the fetch result to the terminal and records
/// the plain rendering in the context. Recognizes no configuration keys.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn init(&mut self, _config: &ReporterConfig) {}

    fn publish(
        &self,
        result: &FetchResult,
        context: &mut ReportContext,
    ) -> Result<(), ReportError> {
        context.insert(CONSOLE_CONTEXT_KEY, render(result));
        display(result);
        Ok(())
    }
}

fn display(result: &FetchResult) {
    println!();
    println!(
        "{}",
        format!("Timesheet fetch: {}", result.source).bold()
    );
    println!("  Fetched at {}", result.fetched_at.to_rfc3339().cyan());
    println!("  {}", "─".repeat(44));
    for day in &result.days {
        println!(
            "  {:<12} {:>8}  {}",
            day.date.to_string(),
            format_minutes(day.worked_minutes),
            day.note.as_deref().unwrap_or("").dimmed()
        );
    }
    println!("  {}", "─".repeat(44));
    println!(
        "  {:<12} {:>8}",
        "TOTAL",
        format_minutes(result.total_minutes()).green().bold()
    );
    println!();
}

fn render(result: &FetchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Timesheet fetch: {}\n", result.source));
    out.push_str(&format!("Fetched at {}\n", result.fetched_at.to_rfc3339()));
    for day in &result.days {
        out.push_str(&day_line(day));
    }
    out.push_str(&format!(
        "Total {}\n",
        format_minutes(result.total_minutes())
    ));
    out
}

fn day_line(day: &DayRecord) -> String {
    match &day.note {
        Some(note) => format!(
            "{}  {}  {}\n",
            day.date,
            format_minutes(day.worked_minutes),
            note
        ),
        None => format!("{}  {}\n", day.date, format_minutes(day.worked_minutes)),
    }
}

fn format_minutes(minutes: i64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
