use std::collections::BTreeSet;
use std::time::Duration;

use bkmkorg_core::BatchReport;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "bkmkorg".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Organize bookmarks by tag\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print how long a phase took, colored by duration
pub fn print_timing(label: &str, duration: Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 50.0 {
        eprintln!("  {} {:>8.2}ms", label.dimmed(), ms.green());
    } else if ms < 250.0 {
        eprintln!("  {} {:>8.2}ms", label.dimmed(), ms.bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms", label.dimmed(), ms.bright_red());
    }
}

/// Print the ingest summary
pub fn print_report(report: &BatchReport, bookmarks: usize) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Import Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    let rows = [
        ("Records:", report.records),
        ("Inserted:", report.inserted),
        ("Merged:", report.merged),
        ("Unchanged:", report.unchanged),
        ("Untagged:", report.untagged),
    ];
    for (label, value) in rows {
        eprintln!("  {:<12} {}", label.dimmed(), value.to_string().bright_white());
    }

    if report.malformed > 0 {
        eprintln!("  {:<12} {}", "Malformed:".dimmed(), report.malformed.to_string().bright_red());
    }
    eprintln!("  {:<12} {}\n", "Bookmarks:".dimmed(), bookmarks.to_string().bold());
}

/// Print the tags co-occurring with a query
pub fn print_frontier(frontier: &BTreeSet<String>) {
    if frontier.is_empty() {
        print_info("No further tags to narrow by");
        return;
    }

    let tags: Vec<&str> = frontier.iter().map(String::as_str).collect();
    eprintln!("{} {}", "Narrow by:".dimmed(), tags.join(" ").bright_white());
}
