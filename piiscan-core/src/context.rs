// piiscan-core/src/context.rs
//! Context-based confidence assessment for detected PII.
//!
//! Decides how likely a detected value is "real" versus a dummy/example,
//! based on the surrounding line. The default implementation is
//! heuristic-only (keywords + digit pattern checks from `piiscan-context`);
//! a named-entity signal can be plugged in behind [`EntitySignal`], and its
//! failure never blocks the pipeline - assessment degrades to keywords only.
//!
//! License: MIT OR Apache-2.0

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use piiscan_context::digits::{digits_only, looks_like_placeholder};
use piiscan_context::keywords::KeywordScanner;
use piiscan_context::scoring::{genuineness_confidence, SignalWeights};

use crate::errors::PiiScanError;
use crate::policy::PiiType;

/// Judgment about a single detected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Genuine,
    Placeholder,
    Uncertain,
}

/// The outcome of one confidence assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Confidence in [0, 1] that the value is genuine.
    pub confidence: f64,
    pub verdict: Verdict,
    pub reason: String,
}

/// A confidence source feeding the risk aggregator.
pub trait ConfidenceAssessor: Send + Sync {
    fn assess(&self, pii_type: PiiType, value: &str, context_line: &str) -> Assessment;
}

/// Pluggable named-entity signal (e.g. an external NER service). Returning
/// an error is always recoverable for the caller.
pub trait EntitySignal: Send + Sync {
    /// True if a person or organization entity appears in the text.
    fn has_person_or_org(&self, text: &str) -> Result<bool, PiiScanError>;
}

static PLACEHOLDER_EMAIL_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)@(?:example\.com|example\.org|example\.net|test\.com|invalid|localhost)\b")
        .expect("placeholder domain pattern must compile")
});

/// Heuristic-only assessor built from keyword and digit-pattern signals.
pub struct KeywordAssessor {
    placeholder_words: KeywordScanner,
    contact_words: KeywordScanner,
    weights: SignalWeights,
    entity_signal: Option<Box<dyn EntitySignal>>,
}

impl fmt::Debug for KeywordAssessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordAssessor")
            .field("weights", &self.weights)
            .field("entity_signal", &self.entity_signal.is_some())
            .finish()
    }
}

impl Default for KeywordAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordAssessor {
    pub fn new() -> Self {
        Self {
            placeholder_words: KeywordScanner::placeholder_markers(),
            contact_words: KeywordScanner::contact_markers(),
            weights: SignalWeights::default(),
            entity_signal: None,
        }
    }

    /// Attaches a pluggable named-entity signal.
    pub fn with_entity_signal(signal: Box<dyn EntitySignal>) -> Self {
        let mut assessor = Self::new();
        assessor.entity_signal = Some(signal);
        assessor
    }

    fn verdict_for_score(score: i32) -> Verdict {
        if score >= 2 {
            Verdict::Genuine
        } else if score <= -2 {
            Verdict::Placeholder
        } else {
            Verdict::Uncertain
        }
    }
}

impl ConfidenceAssessor for KeywordAssessor {
    fn assess(&self, pii_type: PiiType, value: &str, context_line: &str) -> Assessment {
        let mut score = 0i32;
        let mut reasons: Vec<&str> = Vec::new();

        if self.placeholder_words.matches_line(context_line) {
            score += self.weights.placeholder_context;
            reasons.push("dummy/example keywords in context");
        }
        if self.contact_words.matches_line(context_line) {
            score += self.weights.contact_context;
            reasons.push("real-world contact/verification keywords in context");
        }

        if pii_type == PiiType::Email && PLACEHOLDER_EMAIL_DOMAIN_RE.is_match(value) {
            score += self.weights.placeholder_domain;
            reasons.push("example/test email domain");
        }

        let digits = digits_only(value);
        match pii_type {
            PiiType::Phone => {
                if looks_like_placeholder(&digits) {
                    score += self.weights.placeholder_value;
                    reasons.push("phone number looks like a placeholder pattern");
                }
            }
            PiiType::NationalId => {
                if looks_like_placeholder(&digits) || digits.starts_with("1234") {
                    score += self.weights.placeholder_value;
                    reasons.push("id-like value looks like a common example pattern");
                }
                let lowered = context_line.to_lowercase();
                if lowered.contains("aadhaar") || lowered.contains("uidai") {
                    score += self.weights.id_context;
                    reasons.push("government-id vocabulary mentioned nearby");
                }
            }
            PiiType::Email => {}
        }

        if matches!(pii_type, PiiType::Email | PiiType::Phone) {
            if let Some(signal) = &self.entity_signal {
                match signal.has_person_or_org(context_line) {
                    Ok(true) => {
                        score += self.weights.entity_presence;
                        reasons.push("person/org entity present in context");
                    }
                    Ok(false) => {}
                    Err(e) => {
                        // The signal is optional; fall back to keyword-only.
                        debug!("Entity signal unavailable, ignoring: {e}");
                    }
                }
            }
        }

        let confidence = genuineness_confidence(score);
        let verdict = Self::verdict_for_score(score);
        let reason = if reasons.is_empty() {
            "insufficient context signals".to_string()
        } else {
            reasons.join("; ")
        };

        Assessment {
            confidence,
            verdict,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_email_domain_lowers_confidence_sharply() {
        let assessor = KeywordAssessor::new();
        let a = assessor.assess(
            PiiType::Email,
            "dummy.user@example.com",
            "This is an example row.",
        );
        assert_eq!(a.verdict, Verdict::Placeholder);
        assert_eq!(a.confidence, 0.15);
        assert!(a.reason.contains("example/test email domain"));
    }

    #[test]
    fn contact_vocabulary_raises_confidence() {
        let assessor = KeywordAssessor::new();
        let a = assessor.assess(
            PiiType::Phone,
            "98765 01234",
            "Please call our support line for verification.",
        );
        assert!(a.confidence > 0.5);
    }

    #[test]
    fn repeated_digits_look_like_placeholders() {
        let assessor = KeywordAssessor::new();
        let a = assessor.assess(PiiType::Phone, "9999999999", "Number on file:");
        assert_eq!(a.verdict, Verdict::Placeholder);
    }

    #[test]
    fn neutral_context_is_uncertain() {
        let assessor = KeywordAssessor::new();
        let a = assessor.assess(PiiType::Email, "person@company.co", "forwarded as received");
        assert_eq!(a.verdict, Verdict::Uncertain);
        assert_eq!(a.confidence, 0.50);
        assert_eq!(a.reason, "insufficient context signals");
    }

    struct AlwaysPerson;
    impl EntitySignal for AlwaysPerson {
        fn has_person_or_org(&self, _text: &str) -> Result<bool, PiiScanError> {
            Ok(true)
        }
    }

    struct BrokenSignal;
    impl EntitySignal for BrokenSignal {
        fn has_person_or_org(&self, _text: &str) -> Result<bool, PiiScanError> {
            Err(PiiScanError::MissingSeverityWeight)
        }
    }

    #[test]
    fn entity_signal_raises_score_for_contactables() {
        let assessor = KeywordAssessor::with_entity_signal(Box::new(AlwaysPerson));
        let a = assessor.assess(
            PiiType::Email,
            "person@company.co",
            "Priya Sharma can be reached here",
        );
        assert!(a.reason.contains("person/org entity"));
    }

    #[test]
    fn failing_entity_signal_degrades_to_keywords() {
        let assessor = KeywordAssessor::with_entity_signal(Box::new(BrokenSignal));
        let a = assessor.assess(PiiType::Email, "person@company.co", "forwarded as received");
        assert_eq!(a.verdict, Verdict::Uncertain);
    }
}
