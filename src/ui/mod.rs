//! Terminal output for a run
//!
//! Everything the user is meant to read goes to stdout through these helpers.
//! Diagnostics for debugging go through `tracing` instead.

use std::path::Path;

use console::Style;

use crate::bootstrap::{BootstrapOutcome, import_line};
use crate::reconciler::{LinkOutcome, LinkStatus};
use crate::resolver::ResolveIssue;

/// Requirements that could not be satisfied
pub fn print_issues(issues: &[ResolveIssue]) {
    let style = Style::new().yellow();
    for issue in issues {
        println!("{}", style.apply_to(issue));
    }
}

pub fn print_outcomes(outcomes: &[LinkOutcome]) {
    let linked = Style::new().green();
    let skipped = Style::new().dim();
    for outcome in outcomes {
        match &outcome.status {
            LinkStatus::Linked { source } => println!(
                "{} {}",
                linked.apply_to(outcome),
                skipped.apply_to(format!("(from {})", source.display()))
            ),
            _ => println!("{}", skipped.apply_to(outcome)),
        }
    }
}

pub fn print_bootstrap(outcome: BootstrapOutcome, path: &Path, lib_name: &str) {
    let file = path.display();
    match outcome {
        BootstrapOutcome::Created | BootstrapOutcome::Updated => {
            let verb = if outcome == BootstrapOutcome::Created {
                "Created"
            } else {
                "Updated"
            };
            println!("{} {}", Style::new().bold().apply_to(verb), file);
            println!(
                "Added [{}] in [{}]",
                Style::new().cyan().apply_to(import_line(lib_name)),
                file
            );
        }
        BootstrapOutcome::AlreadyPresent => {
            println!(
                "{}",
                Style::new()
                    .dim()
                    .apply_to(format!("Skipped import on [{file}] exists"))
            );
        }
    }
}

pub fn print_notice(message: &str) {
    println!("{}", Style::new().dim().apply_to(message));
}
