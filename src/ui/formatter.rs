//! Pure formatting functions for UI output.
//!
//! Functions here only print; message text is built by the `format_*`
//! helpers so it can be tested without a terminal.

use crate::boundary::BoundaryWarning;
use crate::domain::{ReleaseCounts, Version};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠").yellow().bold(), warning);
}

/// One-line description of a version step, e.g. `1.4.0 → 1.5.0 (minor)`
pub fn format_version_change(previous: &Version, next: &Version, release_type: &str) -> String {
    format!("{} → {} ({})", previous, next, release_type)
}

/// Display the computed release before it is written anywhere.
pub fn display_release_plan(
    previous: Option<&Version>,
    next: &Version,
    release_type: &str,
    counts: &ReleaseCounts,
    pull_requests: usize,
) {
    match previous {
        Some(previous) => {
            println!("\n{}", style("Next release:").bold());
            println!(
                "  {}",
                style(format_version_change(previous, next, release_type)).green()
            );
        }
        None => {
            println!("\n{}", style("Initial release:").bold());
            println!("  {}", style(next).green());
        }
    }
    println!("  {}", format_pull_request_summary(counts, pull_requests));
}

/// `3 pull requests: Additions x2, Fixes x1`
pub fn format_pull_request_summary(counts: &ReleaseCounts, pull_requests: usize) -> String {
    let noun = if pull_requests == 1 {
        "pull request"
    } else {
        "pull requests"
    };
    if counts.categories.is_empty() {
        return format!("{} {}", pull_requests, noun);
    }
    let categories: Vec<String> = counts
        .categories
        .iter()
        .map(|(name, count)| format!("{} x{}", name, count))
        .collect();
    format!("{} {}: {}", pull_requests, noun, categories.join(", "))
}

/// Print a Markdown document between rules.
pub fn display_markdown(markdown: &str) {
    let rule = style("─".repeat(60)).dim();
    println!("{}", rule);
    print!("{}", markdown);
    if !markdown.ends_with('\n') {
        println!();
    }
    println!("{}", rule);
}
