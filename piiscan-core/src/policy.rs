//! Risk classification policy for detected PII.
//!
//! This module maps each PII type to a risk tier and severity weight via a
//! validated policy table. It deliberately does not detect PII (see
//! `detector`) and does not use scoring models; classification stays simple
//! and explainable. Policies load from YAML, merge by type key, and always
//! re-validate before use.
//!
//! License: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::detector::PiiMatch;
use crate::errors::PiiScanError;

/// The categories of PII this pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiType {
    Email,
    Phone,
    NationalId,
}

impl PiiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiType::Email => "email",
            PiiType::Phone => "phone",
            PiiType::NationalId => "national_id",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "email" => Some(PiiType::Email),
            "phone" => Some(PiiType::Phone),
            "national_id" => Some(PiiType::NationalId),
            _ => None,
        }
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical risk bucket. Ordering is `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explainable policy entry for a single PII type.
///
/// - `risk_tier`: categorical bucket for reporting/routing
/// - `severity_weight`: numeric weight in [0.0, 1.0] for aggregation
/// - `rationale`: short human-readable reason, kept stable for audits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    #[serde(rename = "risk_level")]
    pub risk_tier: RiskTier,
    pub severity_weight: f64,
    pub rationale: String,
}

/// A detected match enriched with its policy-resolved risk fields.
///
/// The risk fields are exactly those of the policy entry for the match's
/// type at classification time; they are never cached across policy changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedMatch {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub value: String,
    #[serde(rename = "file")]
    pub source_label: String,
    pub line_number: u32,
    #[serde(rename = "risk_level")]
    pub risk_tier: RiskTier,
    pub severity_weight: f64,
    pub rationale: String,
}

/// A validated mapping from PII type to [`RiskProfile`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Policy {
    profiles: BTreeMap<PiiType, RiskProfile>,
}

impl Policy {
    /// Loads the built-in default policy from the embedded configuration.
    pub fn load_defaults() -> Result<Self> {
        debug!("Loading default policy from embedded string...");
        let default_yaml = include_str!("../config/default_policy.yaml");
        let raw: BTreeMap<String, RiskProfile> =
            serde_yml::from_str(default_yaml).context("Failed to parse default policy")?;
        Ok(Self::from_raw(raw)?)
    }

    /// Loads a policy mapping from a YAML file and validates it. Unknown
    /// type keys, out-of-range weights, and empty rationales are hard
    /// errors.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading policy from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file {}", path.display()))?;
        let raw: BTreeMap<String, RiskProfile> = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse policy file {}", path.display()))?;
        let policy = Self::from_raw(raw)?;
        info!(
            "Loaded policy with {} entries from {}.",
            policy.profiles.len(),
            path.display()
        );
        Ok(policy)
    }

    /// Builds a policy from string-keyed profiles, rejecting unknown keys.
    pub fn from_raw(raw: BTreeMap<String, RiskProfile>) -> Result<Self, PiiScanError> {
        let mut profiles = BTreeMap::new();
        for (key, profile) in raw {
            let pii_type = PiiType::from_key(&key)
                .ok_or_else(|| PiiScanError::UnknownPiiType(key.clone()))?;
            profiles.insert(pii_type, profile);
        }
        let policy = Self { profiles };
        policy.validate()?;
        Ok(policy)
    }

    /// Builds a policy from typed entries and validates it.
    pub fn from_profiles(
        profiles: BTreeMap<PiiType, RiskProfile>,
    ) -> Result<Self, PiiScanError> {
        let policy = Self { profiles };
        policy.validate()?;
        Ok(policy)
    }

    /// Validates every entry: weights in [0, 1], rationale non-empty.
    /// All problems are collected and reported together.
    pub fn validate(&self) -> Result<(), PiiScanError> {
        let mut errors = Vec::new();
        for (pii_type, profile) in &self.profiles {
            if !(0.0..=1.0).contains(&profile.severity_weight) {
                errors.push(format!(
                    "severity_weight for '{}' must be in [0.0, 1.0], got {}",
                    pii_type, profile.severity_weight
                ));
            }
            if profile.rationale.trim().is_empty() {
                errors.push(format!("rationale for '{}' must be non-empty", pii_type));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PiiScanError::PolicyValidation(errors.join("\n")))
        }
    }

    /// Looks up the profile for a PII type.
    pub fn profile(&self, pii_type: PiiType) -> Option<&RiskProfile> {
        self.profiles.get(&pii_type)
    }

    /// Number of entries in the policy.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Adds classification fields to one detected match. Fails if the
    /// match's type has no entry in this policy.
    pub fn classify(&self, m: &PiiMatch) -> Result<ClassifiedMatch, PiiScanError> {
        let profile = self
            .profile(m.pii_type)
            .ok_or(PiiScanError::MissingPolicyEntry(m.pii_type))?;
        Ok(ClassifiedMatch {
            pii_type: m.pii_type,
            value: m.value.clone(),
            source_label: m.source_label.clone(),
            line_number: m.line_number,
            risk_tier: profile.risk_tier,
            severity_weight: profile.severity_weight,
            rationale: profile.rationale.clone(),
        })
    }

    /// Classifies a sequence of detected matches. This is the standard entry
    /// point used by the aggregator's caller.
    pub fn classify_all(&self, matches: &[PiiMatch]) -> Result<Vec<ClassifiedMatch>, PiiScanError> {
        self.validate()?;
        matches.iter().map(|m| self.classify(m)).collect()
    }

    /// Returns the single highest tier among the items' policy-resolved
    /// tiers, or `Low` for an empty set.
    pub fn overall_level(&self, matches: &[PiiMatch]) -> Result<RiskTier, PiiScanError> {
        let mut highest = RiskTier::Low;
        for m in matches {
            let profile = self
                .profile(m.pii_type)
                .ok_or(PiiScanError::MissingPolicyEntry(m.pii_type))?;
            if profile.risk_tier > highest {
                highest = profile.risk_tier;
            }
        }
        Ok(highest)
    }
}

/// Creates a new policy by overlaying `overrides` on top of `base` by type
/// key, re-validating the result.
pub fn merge_policies(base: &Policy, overrides: &Policy) -> Result<Policy, PiiScanError> {
    debug!(
        "merge_policies called. Base entries: {}, override entries: {}",
        base.profiles.len(),
        overrides.profiles.len()
    );
    let mut merged = base.profiles.clone();
    for (pii_type, profile) in &overrides.profiles {
        merged.insert(*pii_type, profile.clone());
    }
    Policy::from_profiles(merged)
}
