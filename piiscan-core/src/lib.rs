// piiscan-core/src/lib.rs
//! # piiscan Core Library
//!
//! `piiscan-core` provides the detection-classification-scoring pipeline for
//! finding exposed Personal Identifiable Information (PII) in text-like
//! content and turning the findings into one explainable risk score. The
//! library is pure and stateless: scanning, detection, classification, and
//! scoring are functions over their inputs with no shared mutable state,
//! so independent scans may run concurrently without coordination.
//!
//! Data flows strictly: bytes → line records → typed matches → classified
//! matches → scored result.
//!
//! ## Modules
//!
//! * `scanner`: decodes sources into ordered, line-numbered [`LineRecord`]s.
//! * `detector`: applies ordered regex families per line with overlap
//!   suppression, producing typed [`PiiMatch`]es.
//! * `policy`: maps each PII type to a risk tier and severity weight via a
//!   validated, mergeable [`Policy`] table.
//! * `scoring`: aggregates severity x confidence contributions into a
//!   bounded 0-100 score and categorical label.
//! * `context`: estimates per-finding confidence from surrounding text,
//!   with a pluggable named-entity signal.
//! * `report`: one-shot wrappers running the full pipeline.
//! * `cache`: transient in-memory TTL store for finished reports.
//! * `redaction`: keeps raw PII values out of log output.
//!
//! ## Usage Example
//!
//! ```rust
//! use piiscan_core::{report_for_bytes, ReportOptions};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let options = ReportOptions::defaults()?;
//!     let input = b"Contact dummy.user@example.com or call 555-123-4567";
//!
//!     let report = report_for_bytes(input, "upload.txt", &options, None)?;
//!     println!("score: {} ({})", report.result.score, report.result.label);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`PiiScanError`]. Configuration problems
//! (invalid start line, malformed policy, unknown type keys) fail fast;
//! decode errors follow an explicit policy; out-of-range aggregation inputs
//! are clamped rather than rejected.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod cache;
pub mod context;
pub mod detector;
pub mod errors;
pub mod policy;
pub mod redaction;
pub mod report;
pub mod scanner;
pub mod scoring;

/// Re-exports the scanner types and entry points.
pub use scanner::{
    scan_bytes, scan_path, scan_paths, scan_reader, scan_text, DecodePolicy, LineRecord,
    ScanOptions, TextEncoding,
};

/// Re-exports the detector surface.
pub use detector::{detect_line, detect_pii, PiiMatch};

/// Re-exports the classification policy types.
pub use policy::{merge_policies, ClassifiedMatch, PiiType, Policy, RiskProfile, RiskTier};

/// Re-exports the risk aggregation surface.
pub use scoring::{
    score_findings, score_value_items, FindingInput, LabelThresholds, RiskScoreResult,
    ScoredFinding,
};

/// Re-exports the confidence assessment capability and its default
/// heuristic implementation.
pub use context::{Assessment, ConfidenceAssessor, EntitySignal, KeywordAssessor, Verdict};

/// Re-exports the one-shot pipeline wrappers.
pub use report::{report_for_bytes, report_for_paths, report_for_records, ReportOptions, ScanReport};

/// Re-exports the transient result cache.
pub use cache::{Clock, ResultCache, SystemClock, DEFAULT_TTL};

/// Re-exports the log redaction helpers.
pub use redaction::{redact_sensitive, sanitize_for_log};

/// Re-exports the custom error type for clear error reporting.
pub use errors::PiiScanError;
