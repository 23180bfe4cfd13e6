//! User-facing progress output
//!
//! Orchestrators never print directly. Everything a user is meant to see goes
//! through a [`Reporter`] handed to the orchestrator, while diagnostics go to
//! `tracing`.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use stackflow_cloud::{ChangeSetSummary, StackEvent};

/// Sink for progress produced by orchestrated operations
pub trait Reporter: Send + Sync {
    /// A change-set status observed while polling
    fn change_set_status(&self, stack: &str, change_set: &str, status: &str);

    fn change_set_summary(&self, stack: &str, summary: &ChangeSetSummary);

    fn change_set_deleted(&self, stack: &str, change_set: &str);

    /// Indented JSON description of a change-set
    fn change_set_detail(&self, rendered: &str);

    fn bucket_created(&self, bucket: &str);

    /// A newly seen stack event, tagged with the command being tailed
    fn stack_event(&self, stack: &str, command: &str, event: &StackEvent);

    /// The tailer for `command` has stopped after printing `printed` events
    fn tail_stopped(&self, stack: &str, command: &str, printed: usize);

    fn stack_updated(&self, stack: &str);

    fn stack_deleted(&self, stack: &str);

    /// Terminate found nothing to delete
    fn stack_missing(&self, stack: &str);
}

/// Reporter printing colored lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn change_set_status(&self, stack: &str, change_set: &str, status: &str) {
        println!(
            "Creating Change-Set: [{}] - {} - {}",
            change_set.cyan(),
            paint_status(status),
            stack
        );
    }

    fn change_set_summary(&self, _stack: &str, summary: &ChangeSetSummary) {
        let created = summary
            .creation_time
            .map(format_rfc850)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}{} - Change-Set: [{}] - Status: [{}] - Execution: [{}]",
            "@".magenta(),
            created,
            summary.change_set_name.cyan(),
            paint_status(summary.status.as_deref().unwrap_or("-")),
            paint_status(summary.execution_status.as_deref().unwrap_or("-"))
        );
    }

    fn change_set_deleted(&self, _stack: &str, change_set: &str) {
        println!("Change-Set: [{}] deleted", change_set.cyan());
    }

    fn change_set_detail(&self, rendered: &str) {
        println!("{}", rendered);
    }

    fn bucket_created(&self, bucket: &str) {
        println!("{} Created bucket [{}]", "✓".green(), bucket);
    }

    fn stack_event(&self, stack: &str, command: &str, event: &StackEvent) {
        let status = event.resource_status.as_deref().unwrap_or("-");
        let mut line = format!(
            "{} - {} - {} - {} - {}",
            event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            command.bold(),
            stack,
            event.resource_type.as_deref().unwrap_or("-"),
            paint_status(status)
        );
        if let Some(ref id) = event.logical_resource_id {
            line.push_str(&format!(" - {}", id));
        }
        if let Some(ref reason) = event.status_reason {
            line.push_str(&format!(" - {}", reason.dimmed()));
        }
        println!("{}", line);
    }

    fn tail_stopped(&self, stack: &str, command: &str, printed: usize) {
        tracing::debug!(
            "Stopped tailing [{}] for {} after {} events",
            stack,
            command,
            printed
        );
    }

    fn stack_updated(&self, stack: &str) {
        println!("{} update successful: [{}]", "✓".green(), stack);
    }

    fn stack_deleted(&self, stack: &str) {
        println!("{} deletion successful: [{}]", "✓".green(), stack);
    }

    fn stack_missing(&self, stack: &str) {
        println!("{}: does not exist...", stack.yellow());
    }
}

/// Color a control plane status word by its outcome
pub fn paint_status(status: &str) -> ColoredString {
    if status.contains("ROLLBACK") || status.contains("FAILED") {
        status.red()
    } else if status.ends_with("COMPLETE") || status == "AVAILABLE" {
        status.green()
    } else if status.ends_with("IN_PROGRESS") || status.ends_with("PENDING") {
        status.yellow()
    } else {
        status.normal()
    }
}

/// `Monday, 02-Jan-06 15:04:05 UTC`
pub fn format_rfc850(at: DateTime<Utc>) -> String {
    at.format("%A, %d-%b-%y %H:%M:%S UTC").to_string()
}
