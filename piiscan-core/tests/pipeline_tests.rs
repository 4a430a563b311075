// piiscan-core/tests/pipeline_tests.rs
//! End-to-end pipeline runs: bytes in, scored report out.

use anyhow::Result;

use piiscan_core::{
    report_for_bytes, KeywordAssessor, PiiType, ReportOptions, RiskTier,
};

#[test_log::test]
fn contact_line_scores_85_critical() -> Result<()> {
    let options = ReportOptions::defaults()?;
    let input = b"Contact dummy.user@example.com or call 555-123-4567";

    let report = report_for_bytes(input, "upload.txt", &options, None)?;
    assert_eq!(report.result.score, 85.0);
    assert_eq!(report.result.label, RiskTier::Critical);
    assert_eq!(report.result.finding_count, 2);

    let email = &report.result.findings[0];
    assert_eq!(email.classified.pii_type, PiiType::Email);
    assert_eq!(email.classified.severity_weight, 0.50);
    assert_eq!(email.classified.risk_tier, RiskTier::Medium);
    assert_eq!(email.confidence, 1.0);

    let phone = &report.result.findings[1];
    assert_eq!(phone.classified.pii_type, PiiType::Phone);
    assert_eq!(phone.classified.severity_weight, 0.70);
    assert_eq!(phone.classified.risk_tier, RiskTier::High);
    Ok(())
}

#[test]
fn empty_input_scores_zero_low() -> Result<()> {
    let options = ReportOptions::defaults()?;
    let report = report_for_bytes(b"", "empty.txt", &options, None)?;
    assert_eq!(report.result.score, 0.0);
    assert_eq!(report.result.label, RiskTier::Low);
    assert!(report.result.findings.is_empty());
    Ok(())
}

#[test]
fn context_assessor_discounts_placeholder_values() -> Result<()> {
    let options = ReportOptions::defaults()?;
    let assessor = KeywordAssessor::new();
    let input = b"Contact dummy.user@example.com or call 555-123-4567";

    let adjusted = report_for_bytes(input, "upload.txt", &options, Some(&assessor))?;
    let unadjusted = report_for_bytes(input, "upload.txt", &options, None)?;

    // example.com plus placeholder digits pull the confidences down.
    assert!(adjusted.result.score < unadjusted.result.score);
    for finding in &adjusted.result.findings {
        assert!(finding.confidence < 1.0);
    }
    Ok(())
}

#[test]
fn report_json_uses_external_field_names() -> Result<()> {
    let options = ReportOptions::defaults()?;
    let report = report_for_bytes(b"mail me: a@b.io", "note.txt", &options, None)?;
    let json = report.to_json()?;

    assert!(json["scan_id"].is_string());
    assert_eq!(json["item_count"], 1);
    let item = &json["scored_items"][0];
    assert_eq!(item["type"], "email");
    assert_eq!(item["file"], "note.txt");
    assert_eq!(item["risk_level"], "medium");
    assert_eq!(item["value"], "a@b.io");
    Ok(())
}
