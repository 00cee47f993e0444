//! Report formatting and printing utilities.
//!
//! This module displays findings in cargo-style format plus the small
//! summaries the other commands print. Separate from engine logic so lingo
//! can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::batch::BatchReport;
use crate::catalog::CatalogStats;
use crate::findings::{Finding, Report, ReportLocation, Severity};
use crate::search::ReplaceReport;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings for one catalog in cargo-style format to stdout.
pub fn report_findings(path: &str, findings: &[Finding]) {
    report_findings_to(path, findings, &mut io::stdout().lock());
}

/// Print findings to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_findings_to<W: Write>(path: &str, findings: &[Finding], writer: &mut W) {
    for finding in findings {
        print_finding(path, finding, writer);
    }
}

fn print_finding<W: Write>(path: &str, finding: &Finding, writer: &mut W) {
    let severity_str = match finding.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        finding.message(),
        finding.report_check().to_string().dimmed().cyan()
    );

    match finding.location() {
        ReportLocation::Unit(unit) => {
            match &unit.location {
                Some(location) => {
                    let _ = writeln!(
                        writer,
                        "  {} {} ({}) {}",
                        "-->".blue(),
                        path,
                        unit.context,
                        location
                    );
                }
                None => {
                    let _ = writeln!(writer, "  {} {} ({})", "-->".blue(), path, unit.context);
                }
            }
            let _ = writeln!(writer, "   {}", "|".blue());
            let _ = writeln!(writer, "   {} {}", "|".blue(), unit.source);
            let _ = writeln!(writer, "   {}", "|".blue());
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = finding.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

/// Print the closing summary line for a check run.
pub fn print_check_summary(finding_count: usize, catalog_count: usize) {
    print_check_summary_to(finding_count, catalog_count, &mut io::stdout().lock());
}

pub fn print_check_summary_to<W: Write>(
    finding_count: usize,
    catalog_count: usize,
    writer: &mut W,
) {
    let catalogs = format!(
        "{} {}",
        catalog_count,
        if catalog_count == 1 { "catalog" } else { "catalogs" }
    );
    if finding_count == 0 {
        let msg = format!("Checked {} - no findings", catalogs);
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
    } else {
        let msg = format!(
            "{} {} found in {}",
            finding_count,
            if finding_count == 1 { "warning" } else { "warnings" },
            catalogs
        );
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.yellow(), msg.yellow());
    }
}

/// Print the outcome of a batch translation run.
pub fn print_batch_report(report: &BatchReport, applied: bool) {
    print_batch_report_to(report, applied, &mut io::stdout().lock());
}

pub fn print_batch_report_to<W: Write>(report: &BatchReport, applied: bool, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Translated {} {}, {} unmatched",
        report.translated,
        if report.translated == 1 { "entry" } else { "entries" },
        report.unmatched
    );
    if report.cancelled {
        let _ = writeln!(writer, "{}", "Batch translation was cancelled".yellow());
    }
    if !applied {
        let _ = writeln!(
            writer,
            "{}",
            "Dry run - use --apply to write the catalog".dimmed()
        );
    }
}

/// Print the outcome of a replace-all run.
pub fn print_replace_report(report: &ReplaceReport, applied: bool) {
    print_replace_report_to(report, applied, &mut io::stdout().lock());
}

pub fn print_replace_report_to<W: Write>(report: &ReplaceReport, applied: bool, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Replaced in {} of {} matched {} ({} without translation skipped)",
        report.replaced,
        report.matched,
        if report.matched == 1 { "entry" } else { "entries" },
        report.skipped
    );
    if !applied {
        let _ = writeln!(
            writer,
            "{}",
            "Dry run - use --apply to write the catalog".dimmed()
        );
    }
}

/// Print a statistics table for the given catalogs, aligned on the widest
/// path.
pub fn print_stats(rows: &[(String, CatalogStats)]) {
    print_stats_to(rows, &mut io::stdout().lock());
}

pub fn print_stats_to<W: Write>(rows: &[(String, CatalogStats)], writer: &mut W) {
    let path_width = rows
        .iter()
        .map(|(path, _)| UnicodeWidthStr::width(path.as_str()))
        .max()
        .unwrap_or(0)
        .max("Catalog".len());

    let _ = writeln!(
        writer,
        "{:<path_width$}  {:>8}  {:>10}  {:>8}  {:>5}",
        "Catalog".bold(),
        "Finished".bold(),
        "Unfinished".bold(),
        "Obsolete".bold(),
        "Total".bold()
    );
    for (path, stats) in rows {
        let pad = path_width - UnicodeWidthStr::width(path.as_str());
        let _ = writeln!(
            writer,
            "{}{:pad$}  {:>8}  {:>10}  {:>8}  {:>5}",
            path,
            "",
            stats.finished,
            stats.unfinished,
            stats.obsolete,
            stats.total()
        );
    }
}
