// piiscan/src/commands/scan.rs
//! Scan command implementation: wires the CLI arguments into the
//! core pipeline and renders the resulting report.

use std::io::Read;

use anyhow::{bail, Context, Result};
use log::{debug, info};

use piiscan_core::{
    merge_policies, report_for_bytes, report_for_paths, ConfidenceAssessor, DecodePolicy,
    KeywordAssessor, Policy, ReportOptions, ScanOptions, ScanReport, TextEncoding,
};

use crate::cli::{EncodingChoice, OutputFormat, ScanCommand};
use crate::ui;

/// Runs the `scan` subcommand.
pub fn run(cmd: &ScanCommand, quiet: bool) -> Result<()> {
    info!("Starting piiscan scan operation.");
    let options = build_options(cmd)?;

    let assessor: Option<KeywordAssessor> = if cmd.no_context {
        None
    } else {
        Some(KeywordAssessor::new())
    };
    let assessor_ref = assessor.as_ref().map(|a| a as &dyn ConfidenceAssessor);

    let report = if cmd.files.is_empty() {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        debug!("Read {} bytes from stdin.", buffer.len());
        report_for_bytes(&buffer, "<stdin>", &options, assessor_ref)?
    } else {
        report_for_paths(&cmd.files, cmd.skip_missing, &options, assessor_ref)?
    };

    render(&report, cmd.format, quiet)?;
    info!("Scan operation completed.");
    Ok(())
}

/// Translates CLI flags into pipeline options, validating as it goes.
fn build_options(cmd: &ScanCommand) -> Result<ReportOptions> {
    if !(0.0..=1.0).contains(&cmd.default_confidence) {
        bail!(
            "--default-confidence must be in [0, 1], got {}",
            cmd.default_confidence
        );
    }

    let mut policy = Policy::load_defaults()?;
    if let Some(path) = &cmd.policy {
        let overrides = Policy::load_from_file(path)
            .with_context(|| format!("Failed to load policy file: {}", path.display()))?;
        policy = merge_policies(&policy, &overrides)?;
    }

    let mut scan = ScanOptions::default();
    scan.encoding = match cmd.encoding {
        EncodingChoice::Utf8 => TextEncoding::Utf8,
        EncodingChoice::Latin1 => TextEncoding::Latin1,
    };
    if cmd.strict_decode {
        scan.decode_policy = DecodePolicy::Strict;
    }

    let mut options = ReportOptions::defaults()?;
    options.policy = policy;
    options.scan = scan;
    options.default_confidence = cmd.default_confidence;
    Ok(options)
}

fn render(report: &ScanReport, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = report.to_json()?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            ui::print_report(report, quiet)?;
        }
    }
    Ok(())
}
