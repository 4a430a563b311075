// piiscan/src/ui.rs
//! Terminal rendering for scan reports.
//!
//! Produces a findings table plus a one-line score summary. Color is
//! applied only when stdout is attached to a terminal, so piped output
//! stays machine-friendly.

use std::io::{self, Write};

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use is_terminal::IsTerminal;
use owo_colors::{AnsiColors, OwoColorize};

use piiscan_core::{RiskTier, ScanReport, ScoredFinding};

fn tier_color(tier: RiskTier) -> AnsiColors {
    match tier {
        RiskTier::Low => AnsiColors::Green,
        RiskTier::Medium => AnsiColors::Yellow,
        RiskTier::High => AnsiColors::Red,
        RiskTier::Critical => AnsiColors::Magenta,
    }
}

fn tier_label(tier: RiskTier, colored: bool) -> String {
    if colored {
        tier.as_str().color(tier_color(tier)).to_string()
    } else {
        tier.as_str().to_string()
    }
}

/// Builds the findings table. Separated from printing so tests can
/// assert on the rendered text.
pub fn findings_table(findings: &[ScoredFinding], colored: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Type",
            "Value",
            "Location",
            "Risk",
            "Weight",
            "Confidence",
            "Contribution",
        ]);
    for finding in findings {
        let cm = &finding.classified;
        table.add_row(vec![
            Cell::new(cm.pii_type.as_str()),
            Cell::new(&cm.value),
            Cell::new(format!("{}:{}", cm.source_label, cm.line_number)),
            Cell::new(tier_label(cm.risk_tier, colored)),
            Cell::new(format!("{:.2}", cm.severity_weight)),
            Cell::new(format!("{:.2}", finding.confidence)),
            Cell::new(format!("{:.2}", finding.contribution)),
        ]);
    }
    table
}

/// Prints the full report to stdout.
pub fn print_report(report: &ScanReport, quiet: bool) -> Result<()> {
    let stdout = io::stdout();
    let colored = stdout.is_terminal();
    let mut writer = stdout.lock();

    if report.result.findings.is_empty() {
        writeln!(writer, "No PII detected.")?;
    } else {
        writeln!(writer, "{}", findings_table(&report.result.findings, colored))?;
    }

    let label = tier_label(report.result.label, colored);
    writeln!(
        writer,
        "Risk score: {:.1} / 100 ({}) from {} finding(s)",
        report.result.score, label, report.result.finding_count
    )?;

    if !quiet {
        writeln!(writer, "Scan id: {}", report.scan_id)?;
        writeln!(writer, "{}", report.result.explanation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use piiscan_core::{ClassifiedMatch, PiiType};

    fn finding() -> ScoredFinding {
        ScoredFinding {
            classified: ClassifiedMatch {
                pii_type: PiiType::Email,
                value: "dummy.user@example.com".to_string(),
                source_label: "notes.txt".to_string(),
                line_number: 3,
                risk_tier: RiskTier::Medium,
                severity_weight: 0.50,
                rationale: "contact identifier".to_string(),
            },
            confidence: 1.0,
            contribution: 0.5,
        }
    }

    #[test_log::test]
    fn table_lists_each_finding_with_location() {
        let rendered = findings_table(&[finding()], false).to_string();
        assert!(rendered.contains("email"));
        assert!(rendered.contains("notes.txt:3"));
        assert!(rendered.contains("0.50"));
    }

    #[test]
    fn uncolored_labels_have_no_escape_codes() {
        let rendered = findings_table(&[finding()], false).to_string();
        assert!(!rendered.contains('\u{1b}'));
    }
}
