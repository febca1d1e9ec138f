//! sheetvet CLI - pre-flight XLSX workbook validation
//!
//! Analyzes a workbook container and prints a severity-grouped summary of the
//! findings, with optional JSON/HTML report export.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sheetvet::{analyze, generate_report, report, Finding, Severity};
use std::fs;
use std::path::PathBuf;

/// Pre-flight structural validation for XLSX workbooks
#[derive(Parser)]
#[command(
    name = "sheetvet",
    author = "iyulab",
    version,
    about = "Validate XLSX workbooks before distribution",
    long_about = "sheetvet - pre-flight structural validation for XLSX workbooks.\n\n\
                  Scans the container for over-length strings, zero-width characters,\n\
                  invalid sheet names, and corrupt embedded parts."
)]
struct Cli {
    /// Path to the workbook to analyze
    file: PathBuf,

    /// Show detailed progress and fix suggestions
    #[arg(short, long)]
    verbose: bool,

    /// Export the report to a JSON file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Export the report to an HTML file
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // The engine narrates to stderr in verbose mode; the spinner would only
    // garble that output.
    let spinner = if cli.verbose {
        None
    } else {
        Some(create_spinner("Analyzing workbook..."))
    };

    let findings = analyze(&cli.file, cli.verbose)?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let file_name = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());
    let analysis_report = generate_report(&file_name, &findings);

    if let Some(path) = &cli.json {
        fs::write(path, report::to_json(&analysis_report, true)?)?;
        println!(
            "{} JSON report saved to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    if let Some(path) = &cli.html {
        fs::write(path, report::to_html(&analysis_report))?;
        println!(
            "{} HTML report saved to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    if findings.is_empty() {
        println!("{} No issues found", "✓".green().bold());
        return Ok(());
    }

    println!(
        "{} Found {} issues:",
        "!".yellow().bold(),
        findings.len()
    );

    // Highest impact first.
    for (severity, group) in analysis_report.by_severity.iter().rev() {
        println!(
            "\n{} {} ({}):",
            severity_icon(*severity),
            severity_label(*severity),
            group.len()
        );
        for finding in group {
            println!("  • {} in {}", finding.kind, format_location(finding));
            println!("    {}", finding.details);
            if cli.verbose {
                if let Some(suggestion) = &finding.fix_suggestion {
                    println!("    {} {}", "hint:".cyan(), suggestion);
                }
            }
        }
    }

    Ok(())
}

fn format_location(finding: &Finding) -> String {
    if finding.is_cell_level() {
        format!(
            "'{}' at {}{}",
            finding.sheet_name, finding.column, finding.row
        )
    } else {
        format!("'{}'", finding.sheet_name)
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::Error => "🟡",
        Severity::Warning => "🟠",
        Severity::Info => "🔵",
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => "CRITICAL".red().bold(),
        Severity::Error => "ERROR".red(),
        Severity::Warning => "WARNING".yellow(),
        Severity::Info => "INFO".blue(),
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
