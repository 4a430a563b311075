//! patterns.rs - The ordered pattern family table for the detector.
//!
//! Families are applied in fixed priority order (email, national-ID,
//! phone) because later families must not re-claim spans already claimed
//! by more specific ones. Each family carries its compiled regex plus the
//! programmatic checks regex alone cannot express.
//!
//! License: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::policy::PiiType;

/// How word-boundedness is enforced for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// `\b` assertions live in the pattern itself.
    Pattern,
    /// The pattern may start/end on non-word characters (e.g. `+`), so the
    /// detector's bounded-search helper checks neighbors programmatically.
    Scan,
}

/// One entry in the ordered detection table.
#[derive(Debug)]
pub(crate) struct PatternFamily {
    pub pii_type: PiiType,
    pub priority: u8,
    pub regex: Regex,
    pub boundary: Boundary,
    /// Minimum digit count after separator stripping; candidates below this
    /// are discarded as false positives.
    pub min_digits: Option<usize>,
    /// Extra acceptance check on the raw candidate text.
    pub guard: Option<fn(&str) -> bool>,
}

// Email pattern (practical, not RFC-5322 complete):
// local part of common permitted characters, "@", dot-separated domain
// labels, TLD of 2+ letters. Case-insensitive, word-bounded.
const EMAIL_PATTERN: &str = r"\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b";

// National-ID-like pattern: 12 digits, commonly written 4-4-4 with an
// optional single space or hyphen between groups. First digit is 2-9.
// No checksum validation; this is deliberately "ID-like".
const NATIONAL_ID_PATTERN: &str = r"\b[2-9]\d{3}[\s\-]?\d{4}[\s\-]?\d{4}\b";

// Phone pattern, intentionally permissive: optional country code
// (+ and 1-3 digits) with separators, optional trunk prefix 0, then either
// a 10-digit mobile starting 6-9 (grouped 3-3-4 or plain) or a generic
// 8+ character run of digits and common separators. The regex crate has no
// lookaround, so the surrounding word-boundary checks are done by the
// detector's bounded search (Boundary::Scan).
const PHONE_PATTERN: &str = concat!(
    r"(?:\+?\s*\d{1,3}[\s\-.()]*)?",
    r"(?:0[\s\-.()]*)?",
    r"(?:[6-9]\d{2}[\s\-.()]*\d{3}[\s\-.()]*\d{4}|[6-9]\d{9}|\d[\d\s\-.()]{6,}\d)",
);

/// Rejects a bare country-calling-code run (`91` + 10 contiguous digits)
/// so certain phone numbers are never misreported as national IDs. Grouped
/// values keep matching; only the contiguous 12-digit form is excluded.
fn not_country_code_run(value: &str) -> bool {
    !(value.starts_with("91") && value.len() == 12 && value.bytes().all(|b| b.is_ascii_digit()))
}

pub(crate) static FAMILIES: Lazy<Vec<PatternFamily>> = Lazy::new(|| {
    vec![
        PatternFamily {
            pii_type: PiiType::Email,
            priority: 0,
            regex: RegexBuilder::new(EMAIL_PATTERN)
                .case_insensitive(true)
                .build()
                .expect("email pattern must compile"),
            boundary: Boundary::Pattern,
            min_digits: None,
            guard: None,
        },
        PatternFamily {
            pii_type: PiiType::NationalId,
            priority: 1,
            regex: Regex::new(NATIONAL_ID_PATTERN).expect("national-id pattern must compile"),
            boundary: Boundary::Pattern,
            min_digits: None,
            guard: Some(not_country_code_run),
        },
        PatternFamily {
            pii_type: PiiType::Phone,
            priority: 2,
            regex: Regex::new(PHONE_PATTERN).expect("phone pattern must compile"),
            boundary: Boundary::Scan,
            min_digits: Some(7),
            guard: None,
        },
    ]
});
