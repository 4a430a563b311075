// piiscan-context/src/lib.rs
//! Context heuristics used to judge whether a detected PII value is genuine
//! or a placeholder. Provides word-boundary-aware keyword scanning, digit
//! pattern checks, and the mapping from a raw signal score to a confidence.

pub mod digits;
pub mod keywords;
pub mod scoring;

/// Common type for confidence values in [0, 1].
pub type Confidence = f64;
