// piiscan-core/src/report.rs
//! One-shot pipeline wrappers: scan, detect, classify, score in one call.
//!
//! These are the primary entry points for non-interactive use. Each call
//! runs the full detection-classification-scoring pipeline over a source
//! and returns a [`ScanReport`] carrying an opaque scan id, a timestamp,
//! and the aggregated result.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::ConfidenceAssessor;
use crate::detector::detect_pii;
use crate::errors::PiiScanError;
use crate::policy::Policy;
use crate::redaction::sanitize_for_log;
use crate::scanner::{self, LineRecord, ScanOptions};
use crate::scoring::{score_findings, FindingInput, LabelThresholds, RiskScoreResult};

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub policy: Policy,
    pub scan: ScanOptions,
    pub thresholds: LabelThresholds,
    /// Confidence assigned to findings the assessor does not adjust.
    pub default_confidence: f64,
}

impl ReportOptions {
    /// Default policy and thresholds, default scan options, confidence 1.0.
    pub fn defaults() -> anyhow::Result<Self> {
        Ok(Self {
            policy: Policy::load_defaults()?,
            scan: ScanOptions::default(),
            thresholds: LabelThresholds::default(),
            default_confidence: 1.0,
        })
    }
}

/// The rendered outcome of one scan request. Created fresh per request and
/// discarded (or cached transiently) after display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: String,
    pub generated_at: String,
    #[serde(flatten)]
    pub result: RiskScoreResult,
}

impl ScanReport {
    pub fn to_json(&self) -> Result<serde_json::Value, PiiScanError> {
        serde_json::to_value(self).map_err(|e| PiiScanError::IoError(e.into()))
    }
}

/// Runs detection, classification, and scoring over prepared line records.
pub fn report_for_records(
    records: &[LineRecord],
    options: &ReportOptions,
    assessor: Option<&dyn ConfidenceAssessor>,
) -> Result<ScanReport, PiiScanError> {
    let matches = detect_pii(records);
    let classified = options.policy.classify_all(&matches)?;

    // Context assessment needs the original line text for each finding.
    let line_lookup: HashMap<(&str, u32), &str> = records
        .iter()
        .map(|r| ((r.source_label.as_str(), r.line_number), r.text.as_str()))
        .collect();

    let inputs: Vec<FindingInput> = classified
        .into_iter()
        .map(|cm| {
            let confidence = assessor.map(|a| {
                let line = line_lookup
                    .get(&(cm.source_label.as_str(), cm.line_number))
                    .copied()
                    .unwrap_or("");
                a.assess(cm.pii_type, &cm.value, line).confidence
            });
            FindingInput {
                classified: cm,
                confidence,
            }
        })
        .collect();

    let result = score_findings(&inputs, options.default_confidence, &options.thresholds);
    let report = ScanReport {
        scan_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now().to_rfc3339(),
        result,
    };

    if log::log_enabled!(log::Level::Debug) {
        if let Ok(payload) = report.to_json() {
            debug!("Scan report: {}", sanitize_for_log(&payload));
        }
    }
    Ok(report)
}

/// Scans in-memory bytes (e.g. uploaded content) and reports on them.
pub fn report_for_bytes(
    data: &[u8],
    source_label: &str,
    options: &ReportOptions,
    assessor: Option<&dyn ConfidenceAssessor>,
) -> Result<ScanReport, PiiScanError> {
    let records = scanner::scan_bytes(data, source_label, &options.scan)?;
    report_for_records(&records, options, assessor)
}

/// Scans a batch of file paths in order and reports on the combined
/// findings.
pub fn report_for_paths<P: AsRef<Path>>(
    paths: &[P],
    skip_missing: bool,
    options: &ReportOptions,
    assessor: Option<&dyn ConfidenceAssessor>,
) -> Result<ScanReport, PiiScanError> {
    let records = scanner::scan_paths(paths, &options.scan, skip_missing)?;
    report_for_records(&records, options, assessor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_reports_zero_low() {
        let options = ReportOptions::defaults().unwrap();
        let report = report_for_bytes(b"", "empty.txt", &options, None).unwrap();
        assert_eq!(report.result.score, 0.0);
        assert_eq!(report.result.label.as_str(), "low");
        assert_eq!(report.result.finding_count, 0);
        assert!(!report.scan_id.is_empty());
    }
}
