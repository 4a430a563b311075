//! errors.rs - Custom error types for the piiscan-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

use crate::policy::PiiType;

/// This enum represents all possible error types in the `piiscan-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PiiScanError {
    #[error("start_line must be >= 1, got {0}")]
    InvalidStartLine(u32),

    #[error("failed to decode input '{label}' as {encoding}: {detail}")]
    DecodeError {
        label: String,
        encoding: String,
        detail: String,
    },

    #[error("Policy validation failed:\n{0}")]
    PolicyValidation(String),

    #[error("Unknown PII type key in policy: '{0}'")]
    UnknownPiiType(String),

    #[error("No policy entry for PII type '{0}'")]
    MissingPolicyEntry(PiiType),

    #[error("Each scored item must include 'severity_weight' (0..1)")]
    MissingSeverityWeight,

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}
