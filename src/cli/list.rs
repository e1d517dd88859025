//! List command, plus the record rendering shared with search.

use crate::cli::entries::RecordView;
use crate::cli::output;
use crate::cli::resolve::open_store;
use crate::core::store::LoadReport;
use crate::error::Result;

const PREVIEW_WIDTH: usize = 60;

/// List the most recent entries.
pub fn execute(store: Option<&str>, count: usize, json: bool) -> Result<()> {
    let store = open_store(store)?;
    let report = store.list_recent(count);
    render(&report, json)
}

/// Print loaded records (newest first) and warn about failures.
pub(crate) fn render(report: &LoadReport, json: bool) -> Result<()> {
    if json {
        let views: Vec<RecordView<'_>> = report.records.iter().map(RecordView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else if report.records.is_empty() && report.failures.is_empty() {
        output::dimmed("no entries");
    } else {
        for record in &report.records {
            let tags = if record.tags().is_empty() {
                String::new()
            } else {
                format!(" [{}]", record.tags().join(", "))
            };
            println!(
                "{}  {}{}  {}",
                output::id(record.id()),
                output::faint(record.created_at().format("%Y-%m-%d")),
                tags,
                preview(record.content())
            );
        }
    }

    for failure in &report.failures {
        output::warn(&format!("could not load {}: {}", failure.location, failure.error));
    }
    Ok(())
}

/// First line of `content`, shortened to the preview width.
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or("").trim();
    if line.chars().count() <= PREVIEW_WIDTH {
        return line.to_string();
    }
    let cut: String = line.chars().take(PREVIEW_WIDTH - 1).collect();
    format!("{cut}…")
}
