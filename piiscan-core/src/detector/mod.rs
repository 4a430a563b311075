// piiscan-core/src/detector/mod.rs
//! Regex-based PII detection over line records.
//!
//! Detects, line by line:
//! - email addresses
//! - phone numbers (permissive formatting, recall over precision)
//! - national-ID-like numbers (12 digits, commonly grouped 4-4-4)
//!
//! Families run in fixed priority order; every accepted match reserves its
//! character span, and any later-family candidate overlapping a reserved
//! span is discarded. Each character position therefore contributes to at
//! most one finding type, preferring the most specific pattern. No
//! cross-line matching is performed.
//!
//! License: MIT OR Apache-2.0

mod patterns;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::policy::PiiType;
use crate::redaction::log_finding_debug;
use crate::scanner::LineRecord;

use patterns::{Boundary, FAMILIES};

/// A single detected PII occurrence, untransformed, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiMatch {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub value: String,
    #[serde(rename = "file")]
    pub source_label: String,
    pub line_number: u32,
}

/// Tracks character spans already claimed by accepted matches on one line.
/// Kept separate from pattern matching so the reservation rule is testable
/// on its own.
#[derive(Debug, Default)]
pub(crate) struct SpanLedger {
    spans: Vec<(usize, usize)>,
}

impl SpanLedger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Half-open interval overlap test against every reserved span.
    pub(crate) fn overlaps(&self, start: usize, end: usize) -> bool {
        self.spans.iter().any(|&(s, e)| start < e && s < end)
    }

    pub(crate) fn reserve(&mut self, start: usize, end: usize) {
        self.spans.push((start, end));
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds non-overlapping matches of `re` whose neighbors are not word
/// characters. Candidates touching a word character are skipped and the
/// search resumes one character past their start, so a later valid
/// candidate on the same line is still found.
pub(crate) fn find_word_bounded<'t>(re: &Regex, line: &'t str) -> Vec<regex::Match<'t>> {
    let mut found = Vec::new();
    let mut pos = 0usize;

    while pos <= line.len() {
        let Some(m) = re.find_at(line, pos) else {
            break;
        };
        let before_ok = line[..m.start()]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = line[m.end()..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));

        if before_ok && after_ok {
            found.push(m);
            pos = m.end();
        } else {
            // Advance past the first character of the rejected candidate.
            pos = m.start()
                + line[m.start()..]
                    .chars()
                    .next()
                    .map_or(1, |c| c.len_utf8());
        }
    }
    found
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Detects PII on a single line, applying the family table in priority
/// order with span reservation.
pub fn detect_line(record: &LineRecord) -> Vec<PiiMatch> {
    let mut ledger = SpanLedger::new();
    let mut matches = Vec::new();

    for family in FAMILIES.iter() {
        let candidates: Vec<(usize, usize, &str)> = match family.boundary {
            Boundary::Pattern => family
                .regex
                .find_iter(&record.text)
                .map(|m| (m.start(), m.end(), m.as_str()))
                .collect(),
            Boundary::Scan => find_word_bounded(&family.regex, &record.text)
                .into_iter()
                .map(|m| (m.start(), m.end(), m.as_str()))
                .collect(),
        };

        for (start, end, raw) in candidates {
            if ledger.overlaps(start, end) {
                continue;
            }
            let value = raw.trim();
            if let Some(min_digits) = family.min_digits {
                if digit_count(value) < min_digits {
                    continue;
                }
            }
            if let Some(guard) = family.guard {
                if !guard(value) {
                    continue;
                }
            }
            ledger.reserve(start, end);
            log_finding_debug(module_path!(), family.pii_type.as_str(), value);
            matches.push(PiiMatch {
                pii_type: family.pii_type,
                value: value.to_string(),
                source_label: record.source_label.clone(),
                line_number: record.line_number,
            });
        }
    }
    matches
}

/// Detects PII across an ordered sequence of line records.
pub fn detect_pii(records: &[LineRecord]) -> Vec<PiiMatch> {
    let mut matches = Vec::new();
    for record in records {
        matches.extend(detect_line(record));
    }
    debug!(
        "Detected {} PII match(es) across {} line(s).",
        matches.len(),
        records.len()
    );
    matches
}
