// piiscan-core/tests/policy_tests.rs
use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

use piiscan_core::{
    merge_policies, PiiMatch, PiiScanError, PiiType, Policy, RiskProfile, RiskTier,
};

fn email_match() -> PiiMatch {
    PiiMatch {
        pii_type: PiiType::Email,
        value: "dummy.user@example.com".to_string(),
        source_label: "a.txt".to_string(),
        line_number: 7,
    }
}

fn profile(tier: RiskTier, weight: f64) -> RiskProfile {
    RiskProfile {
        risk_tier: tier,
        severity_weight: weight,
        rationale: "test rationale".to_string(),
    }
}

#[test]
fn classify_attaches_policy_fields() -> Result<()> {
    let policy = Policy::load_defaults()?;
    let classified = policy.classify(&email_match())?;
    assert_eq!(classified.pii_type, PiiType::Email);
    assert_eq!(classified.risk_tier, RiskTier::Medium);
    assert_eq!(classified.severity_weight, 0.50);
    assert_eq!(classified.line_number, 7);
    assert!(!classified.rationale.is_empty());
    Ok(())
}

#[test]
fn classify_fails_for_missing_entry() {
    let policy = Policy::default();
    let err = policy.classify(&email_match()).unwrap_err();
    assert!(matches!(err, PiiScanError::MissingPolicyEntry(PiiType::Email)));
}

#[test]
fn merge_overlays_overrides_and_revalidates() -> Result<()> {
    let base = Policy::load_defaults()?;
    let mut overrides = BTreeMap::new();
    overrides.insert(PiiType::Email, profile(RiskTier::Low, 0.10));
    let overrides = Policy::from_profiles(overrides)?;

    let merged = merge_policies(&base, &overrides)?;
    let classified = merged.classify(&email_match())?;
    assert_eq!(classified.severity_weight, 0.10);
    assert_eq!(classified.risk_tier, RiskTier::Low);
    // Untouched entries survive the merge.
    assert_eq!(
        merged.profile(PiiType::Phone).unwrap().severity_weight,
        0.70
    );
    Ok(())
}

#[test]
fn out_of_range_weight_is_rejected() {
    let mut profiles = BTreeMap::new();
    profiles.insert(PiiType::Phone, profile(RiskTier::High, 1.5));
    let err = Policy::from_profiles(profiles).unwrap_err();
    assert!(matches!(err, PiiScanError::PolicyValidation(_)));
    assert!(err.to_string().contains("severity_weight"));
}

#[test]
fn empty_rationale_is_rejected() {
    let mut profiles = BTreeMap::new();
    profiles.insert(
        PiiType::Email,
        RiskProfile {
            risk_tier: RiskTier::Medium,
            severity_weight: 0.5,
            rationale: "   ".to_string(),
        },
    );
    let err = Policy::from_profiles(profiles).unwrap_err();
    assert!(err.to_string().contains("rationale"));
}

#[test]
fn load_from_file_accepts_known_keys() -> Result<()> {
    let yaml = r#"
email:
  risk_level: low
  severity_weight: 0.25
  rationale: "tuned down for internal scans"
phone:
  risk_level: high
  severity_weight: 0.70
  rationale: "kept at default"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    let policy = Policy::load_from_file(file.path())?;
    assert_eq!(policy.len(), 2);
    assert_eq!(policy.profile(PiiType::Email).unwrap().severity_weight, 0.25);
    Ok(())
}

#[test]
fn load_from_file_rejects_unknown_type_key() -> Result<()> {
    let yaml = r#"
email:
  risk_level: medium
  severity_weight: 0.5
  rationale: "ok"
passport:
  risk_level: high
  severity_weight: 0.9
  rationale: "unknown key"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    let err = Policy::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("passport"));
    Ok(())
}

#[test]
fn overall_level_takes_highest_tier() -> Result<()> {
    let policy = Policy::load_defaults()?;
    let matches = vec![
        email_match(),
        PiiMatch {
            pii_type: PiiType::NationalId,
            value: "2345 6789 0123".to_string(),
            source_label: "a.txt".to_string(),
            line_number: 9,
        },
    ];
    assert_eq!(policy.overall_level(&matches)?, RiskTier::Critical);
    assert_eq!(policy.overall_level(&[])?, RiskTier::Low);
    Ok(())
}
