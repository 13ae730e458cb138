//! Output formatting and display logic for telecheck

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::core::constants::{display, output_formats};
use crate::core::error::Result;
use crate::core::types::{CheckMode, LinkResult, ResultFilter, StatsData};
use crate::ui::color::{Colors, colorize, status_color, status_emoji};
use crate::validation::CheckReport;

/// Summary figures shown with every result listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMetadata {
    pub mode: CheckMode,
    pub filter: &'static str,
    pub links_found: usize,
    pub duplicates_removed: usize,
    pub checked: usize,
    pub valid: usize,
    pub invalid: usize,
    pub other: usize,
    pub duration_ms: u128,
}

impl DisplayMetadata {
    pub fn from_report(report: &CheckReport, filter: ResultFilter) -> Self {
        Self {
            mode: report.mode,
            filter: filter.as_str(),
            links_found: report.links_found,
            duplicates_removed: report.duplicates_removed,
            checked: report.results.len(),
            valid: report.results.valid_count(),
            invalid: report.results.invalid_count(),
            other: report.results.other_count(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    checked_at: String,
    summary: &'a DisplayMetadata,
    results: &'a [LinkResult],
}

#[derive(Serialize)]
struct JsonStats<'a> {
    fetched_at: String,
    #[serde(flatten)]
    stats: &'a StatsData,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render the filtered results of a check in the requested format.
pub fn format_results(
    report: &CheckReport,
    filter: ResultFilter,
    output_format: &str,
) -> Result<String> {
    let metadata = DisplayMetadata::from_report(report, filter);
    let selected = report.results.filtered(filter);

    match output_format {
        output_formats::MINIMAL => Ok(format_minimal(&selected)),
        output_formats::JSON => format_json(&selected, &metadata),
        _ => Ok(format_text(&selected, &metadata)),
    }
}

/// Print the filtered results of a check to stdout.
pub fn display_results(
    report: &CheckReport,
    filter: ResultFilter,
    output_format: &str,
) -> Result<()> {
    let rendered = format_results(report, filter, output_format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// `status link` lines, no colors or emojis
fn format_minimal(results: &[LinkResult]) -> String {
    results
        .iter()
        .map(|result| format!("{} {}", result.status, result.link))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_json(results: &[LinkResult], metadata: &DisplayMetadata) -> Result<String> {
    let document = JsonReport {
        checked_at: timestamp(),
        summary: metadata,
        results,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Header, summary chips, then one line per verdict
fn format_text(results: &[LinkResult], metadata: &DisplayMetadata) -> String {
    let mut lines = Vec::with_capacity(results.len() + 4);

    let noun = if metadata.checked == 1 { "link" } else { "links" };
    lines.push(format!(
        "{} {}",
        display::STATS_EMOJI,
        colorize(
            &colorize(&format!("Processed {} {noun}", metadata.checked), Colors::BOLD),
            Colors::CYAN
        )
    ));

    if metadata.duplicates_removed > 0 {
        let noun = if metadata.duplicates_removed == 1 {
            "duplicate"
        } else {
            "duplicates"
        };
        lines.push(colorize(
            &format!("Removed {} {noun}", metadata.duplicates_removed),
            Colors::BRIGHT_BLACK,
        ));
    }

    lines.push(format!(
        "{}  {}",
        colorize(&format!("{} Valid", metadata.valid), Colors::GREEN),
        colorize(&format!("{} Invalid", metadata.invalid), Colors::RED)
    ));
    lines.push(String::new());

    if results.is_empty() {
        lines.push(colorize(display::EMPTY_FILTER_MESSAGE, Colors::DIM));
    } else {
        lines.extend(results.iter().map(format_text_line));
    }

    lines.join("\n")
}

fn format_text_line(result: &LinkResult) -> String {
    format!(
        "{} {} {}",
        status_emoji(&result.status),
        colorize(&result.link, status_color(&result.status)),
        colorize(&format!("({})", result.reason_or_status()), Colors::DIM)
    )
}

/// Render the service counters in the requested format.
pub fn format_stats(stats: &StatsData, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::MINIMAL => Ok(format!(
            "total {}\nvalid {}\ninvalid {}",
            stats.total, stats.valid, stats.invalid
        )),
        output_formats::JSON => Ok(serde_json::to_string_pretty(&JsonStats {
            fetched_at: timestamp(),
            stats,
        })?),
        _ => Ok([
            format!(
                "{} {}",
                display::STATS_EMOJI,
                colorize(&colorize("Service stats", Colors::BOLD), Colors::CYAN)
            ),
            format!("Total checked: {}", stats.total),
            colorize(&format!("Valid: {}", stats.valid), Colors::GREEN),
            colorize(&format!("Invalid: {}", stats.invalid), Colors::RED),
        ]
        .join("\n")),
    }
}

/// Print the service counters to stdout.
pub fn display_stats(stats: &StatsData, output_format: &str) -> Result<()> {
    println!("{}", format_stats(stats, output_format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::{LinkStatus, ResultSet};
    use std::time::Duration;

    fn sample_report() -> CheckReport {
        CheckReport {
            mode: CheckMode::Bulk,
            input: "https://t.me/a\nhttps://t.me/b\nhttps://mega.nz/x".to_string(),
            results: ResultSet::new(vec![
                LinkResult::new("https://t.me/a", LinkStatus::Valid, Some("ok".to_string())),
                LinkResult::new(
                    "https://t.me/b",
                    LinkStatus::Invalid,
                    Some("Channel not found".to_string()),
                ),
                LinkResult::new("https://mega.nz/x", LinkStatus::Other("mega".to_string()), None),
            ]),
            links_found: 4,
            duplicates_removed: 1,
            duration: Duration::from_millis(42),
        }
    }

    #[test]
    fn test_display_metadata__counts() {
        let metadata = DisplayMetadata::from_report(&sample_report(), ResultFilter::Valid);

        assert_eq!(metadata.checked, 3);
        assert_eq!(metadata.valid, 1);
        assert_eq!(metadata.invalid, 1);
        assert_eq!(metadata.other, 1);
        assert_eq!(metadata.filter, "valid");
        assert_eq!(metadata.duration_ms, 42);
    }

    #[test]
    fn test_format_results__minimal() -> Result<()> {
        let actual = format_results(&sample_report(), ResultFilter::All, "minimal")?;

        assert_eq!(
            actual,
            "valid https://t.me/a\ninvalid https://t.me/b\nmega https://mega.nz/x"
        );
        Ok(())
    }

    #[test]
    fn test_format_results__minimal_respects_filter() -> Result<()> {
        let actual = format_results(&sample_report(), ResultFilter::Invalid, "minimal")?;

        assert_eq!(actual, "invalid https://t.me/b");
        Ok(())
    }

    #[test]
    fn test_format_results__text() -> Result<()> {
        let actual = format_results(&sample_report(), ResultFilter::All, "text")?;

        assert!(actual.contains("Processed 3 links"));
        assert!(actual.contains("Removed 1 duplicate"));
        assert!(actual.contains("1 Valid"));
        assert!(actual.contains("1 Invalid"));
        assert!(actual.contains("✅ https://t.me/a (ok)"));
        assert!(actual.contains("❌ https://t.me/b (Channel not found)"));
        assert!(actual.contains("🔷 https://mega.nz/x (mega)"));
        Ok(())
    }

    #[test]
    fn test_format_results__text_empty_filter() -> Result<()> {
        let mut report = sample_report();
        report.results = ResultSet::new(vec![LinkResult::new(
            "https://t.me/a",
            LinkStatus::Valid,
            None,
        )]);

        let actual = format_results(&report, ResultFilter::Invalid, "text")?;

        assert!(actual.ends_with("No links found for this filter."));
        Ok(())
    }

    #[test]
    fn test_format_results__json() -> Result<()> {
        let actual = format_results(&sample_report(), ResultFilter::All, "json")?;
        let value: serde_json::Value = serde_json::from_str(&actual)?;

        assert!(value["checked_at"].is_string());
        assert_eq!(value["summary"]["checked"], 3);
        assert_eq!(value["summary"]["duplicates_removed"], 1);
        assert_eq!(value["summary"]["mode"], "bulk");
        assert_eq!(value["results"][1]["status"], "invalid");
        assert_eq!(value["results"][1]["reason"], "Channel not found");
        assert!(value["results"][2].get("reason").is_none());
        Ok(())
    }

    #[test]
    fn test_format_results__json_without_links() -> Result<()> {
        let mut report = sample_report();
        report.results = ResultSet::new(Vec::new());
        report.links_found = 0;
        report.duplicates_removed = 0;

        let value: serde_json::Value =
            serde_json::from_str(&format_results(&report, ResultFilter::All, "json")?)?;

        assert_eq!(value["summary"]["checked"], 0);
        assert_eq!(value["results"], serde_json::json!([]));
        assert_eq!(format_results(&report, ResultFilter::All, "minimal")?, "");
        Ok(())
    }

    #[test]
    fn test_format_stats() -> Result<()> {
        let stats = StatsData {
            total: 10,
            valid: 7,
            invalid: 3,
        };

        let text = format_stats(&stats, "text")?;
        assert!(text.contains("Total checked: 10"));
        assert!(text.contains("Valid: 7"));
        assert!(text.contains("Invalid: 3"));

        assert_eq!(format_stats(&stats, "minimal")?, "total 10\nvalid 7\ninvalid 3");

        let value: serde_json::Value = serde_json::from_str(&format_stats(&stats, "json")?)?;
        assert_eq!(value["total"], 10);
        assert!(value["fetched_at"].is_string());
        Ok(())
    }
}
