//! Transparent risk scoring for classified PII findings.
//!
//! Each finding contributes `clamp(severity_weight x confidence)` in [0, 1].
//! Contributions combine through complementary probability accumulation:
//!
//! ```text
//! combined_risk = 1 - prod(1 - contribution_i)
//! score         = round(combined_risk * 100, 2)
//! ```
//!
//! The running product guarantees the score never exceeds 100, grows
//! monotonically as findings are added, and gives each additional weak
//! finding a diminishing marginal impact. The formula treats findings as
//! independent events; that is a modeling simplification, not a statistical
//! guarantee.
//!
//! License: MIT OR Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::PiiScanError;
use crate::policy::{ClassifiedMatch, RiskTier};

/// Stable, human-readable explanation attached to every score result.
const SCORE_EXPLANATION: &str = "We assign each finding an impact (severity x confidence). \
    We then combine impacts so multiple findings raise the overall risk, \
    with diminishing returns, and the final score is capped at 100.";

fn clamp01(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// A classified match paired with an optional per-occurrence confidence.
/// Confidence falls back to the aggregator's `default_confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingInput {
    #[serde(flatten)]
    pub classified: ClassifiedMatch,
    pub confidence: Option<f64>,
}

impl From<ClassifiedMatch> for FindingInput {
    fn from(classified: ClassifiedMatch) -> Self {
        Self {
            classified,
            confidence: None,
        }
    }
}

/// A finding with its resolved confidence and risk contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFinding {
    #[serde(flatten)]
    pub classified: ClassifiedMatch,
    pub confidence: f64,
    pub contribution: f64,
}

/// The aggregated outcome of one scoring call. Derived data, recomputed per
/// call; nothing here carries persisted identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub score: f64,
    pub label: RiskTier,
    #[serde(rename = "item_count")]
    pub finding_count: usize,
    #[serde(rename = "scored_items")]
    pub findings: Vec<ScoredFinding>,
    pub explanation: String,
}

/// Mapping from tier to the minimum score that earns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelThresholds(BTreeMap<RiskTier, f64>);

impl Default for LabelThresholds {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(RiskTier::Low, 0.0);
        map.insert(RiskTier::Medium, 20.0);
        map.insert(RiskTier::High, 50.0);
        map.insert(RiskTier::Critical, 80.0);
        Self(map)
    }
}

impl LabelThresholds {
    pub fn new(thresholds: BTreeMap<RiskTier, f64>) -> Self {
        Self(thresholds)
    }

    /// Converts a 0-100 score into a label: thresholds are scanned in
    /// ascending order and the highest threshold the score meets wins.
    /// Equal thresholds resolve to the higher tier. The lowest-threshold
    /// tier is the fallback when nothing matches.
    pub fn label_for(&self, score: f64) -> RiskTier {
        let mut ordered: Vec<(RiskTier, f64)> = self.0.iter().map(|(t, v)| (*t, *v)).collect();
        ordered.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let mut label = ordered.first().map(|(t, _)| *t).unwrap_or(RiskTier::Low);
        for (tier, min_score) in ordered {
            if score >= min_score {
                label = tier;
            }
        }
        label
    }
}

fn accumulate(contributions: impl Iterator<Item = f64>) -> f64 {
    // Empty product = 1.0, so zero findings yield zero risk.
    let mut product_not_risky = 1.0f64;
    for contribution in contributions {
        product_not_risky *= 1.0 - contribution;
    }
    1.0 - clamp01(product_not_risky)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Aggregates typed findings into a final score and label. Severity and
/// confidence are clamped into [0, 1] before use; confidence defaults to
/// `default_confidence` when absent.
pub fn score_findings(
    items: &[FindingInput],
    default_confidence: f64,
    thresholds: &LabelThresholds,
) -> RiskScoreResult {
    let mut findings = Vec::with_capacity(items.len());

    for item in items {
        let severity = clamp01(item.classified.severity_weight);
        let confidence = clamp01(item.confidence.unwrap_or(default_confidence));
        let contribution = clamp01(severity * confidence);
        findings.push(ScoredFinding {
            classified: item.classified.clone(),
            confidence,
            contribution,
        });
    }

    let combined_risk = accumulate(findings.iter().map(|f| f.contribution));
    let score = round2(combined_risk * 100.0);
    let label = thresholds.label_for(score);

    RiskScoreResult {
        score,
        label,
        finding_count: findings.len(),
        findings,
        explanation: SCORE_EXPLANATION.to_string(),
    }
}

/// Aggregates loosely-typed JSON items (the external dict-shaped interface).
///
/// Every item must carry `severity_weight`; a missing field is a hard error
/// because silently assuming a severity would misstate risk. Non-numeric or
/// out-of-range numerics are coerced via clamping. All other keys are
/// preserved in the breakdown, with `contribution` added per item.
pub fn score_value_items(
    items: &[Value],
    default_confidence: f64,
    thresholds: &LabelThresholds,
) -> Result<Value, PiiScanError> {
    let mut scored_items = Vec::with_capacity(items.len());
    let mut product_not_risky = 1.0f64;

    for raw in items {
        let severity = match raw.get("severity_weight") {
            Some(v) => clamp01(v.as_f64().unwrap_or(0.0)),
            None => return Err(PiiScanError::MissingSeverityWeight),
        };
        let confidence = clamp01(
            raw.get("confidence")
                .and_then(Value::as_f64)
                .unwrap_or(default_confidence),
        );
        let contribution = clamp01(severity * confidence);
        product_not_risky *= 1.0 - contribution;

        let mut scored = raw.clone();
        if let Some(map) = scored.as_object_mut() {
            map.insert("contribution".to_string(), contribution.into());
        }
        scored_items.push(scored);
    }

    let combined_risk = 1.0 - clamp01(product_not_risky);
    let score = round2(combined_risk * 100.0);
    let label = thresholds.label_for(score);

    Ok(serde_json::json!({
        "score": score,
        "label": label,
        "item_count": scored_items.len(),
        "scored_items": scored_items,
        "explanation": SCORE_EXPLANATION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PiiType;

    fn classified(severity: f64) -> ClassifiedMatch {
        ClassifiedMatch {
            pii_type: PiiType::Email,
            value: "dummy.user@example.com".to_string(),
            source_label: "test.txt".to_string(),
            line_number: 1,
            risk_tier: RiskTier::Medium,
            severity_weight: severity,
            rationale: "test entry".to_string(),
        }
    }

    #[test]
    fn empty_findings_score_zero_low() {
        let result = score_findings(&[], 1.0, &LabelThresholds::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, RiskTier::Low);
        assert_eq!(result.finding_count, 0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped_not_rejected() {
        let items = vec![FindingInput {
            classified: classified(3.5),
            confidence: Some(-1.0),
        }];
        let result = score_findings(&items, 1.0, &LabelThresholds::default());
        assert_eq!(result.findings[0].contribution, 0.0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn label_tie_resolves_to_higher_tier() {
        let mut map = BTreeMap::new();
        map.insert(RiskTier::Low, 0.0);
        map.insert(RiskTier::Medium, 50.0);
        map.insert(RiskTier::High, 50.0);
        let thresholds = LabelThresholds::new(map);
        assert_eq!(thresholds.label_for(50.0), RiskTier::High);
        assert_eq!(thresholds.label_for(49.9), RiskTier::Low);
    }

    #[test]
    fn missing_severity_weight_is_a_hard_error() {
        let items = vec![serde_json::json!({"type": "email", "confidence": 0.9})];
        let err = score_value_items(&items, 1.0, &LabelThresholds::default()).unwrap_err();
        assert!(matches!(err, PiiScanError::MissingSeverityWeight));
    }

    #[test]
    fn value_items_preserve_extra_keys_and_add_contribution() {
        let items = vec![serde_json::json!({
            "type": "phone",
            "severity_weight": 0.7,
            "file": "a.txt",
        })];
        let result = score_value_items(&items, 1.0, &LabelThresholds::default()).unwrap();
        assert_eq!(result["scored_items"][0]["contribution"], 0.7);
        assert_eq!(result["scored_items"][0]["file"], "a.txt");
        assert_eq!(result["score"], 70.0);
        assert_eq!(result["label"], "high");
    }
}
