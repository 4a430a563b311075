// piiscan-core/src/scanner.rs
//! Line-oriented scanning of text-like sources.
//!
//! Turns raw bytes, readers, or files into an ordered sequence of
//! [`LineRecord`] items: one per logical line, with a source label and a
//! 1-based line number. `\n` and `\r\n` are split uniformly. Decoding is
//! governed by an explicit [`DecodePolicy`] so a single malformed byte
//! sequence never aborts a scan unless strict mode is requested.
//!
//! License: MIT OR Apache-2.0

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::PiiScanError;

/// A single logical line of input, as produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub source_label: String,
    pub line_number: u32,
    pub text: String,
}

/// Supported text encodings for input decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }
}

/// How to handle byte sequences that are invalid in the chosen encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Fail the scan on the first invalid sequence.
    Strict,
    /// Substitute U+FFFD for invalid sequences (default).
    #[default]
    Replace,
    /// Drop invalid sequences entirely.
    Ignore,
}

/// Options controlling how sources are decoded and split into lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub encoding: TextEncoding,
    pub decode_policy: DecodePolicy,
    /// If true, each record retains its trailing newline characters.
    pub keep_newline: bool,
    /// First line number to assign per source. Must be >= 1.
    pub start_line: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            decode_policy: DecodePolicy::Replace,
            keep_newline: false,
            start_line: 1,
        }
    }
}

impl ScanOptions {
    fn check(&self) -> Result<(), PiiScanError> {
        if self.start_line < 1 {
            return Err(PiiScanError::InvalidStartLine(self.start_line));
        }
        Ok(())
    }
}

fn decode_utf8_ignoring_invalid(mut data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    loop {
        match std::str::from_utf8(data) {
            Ok(tail) => {
                out.push_str(tail);
                break;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&data[..valid]));
                let skip = e.error_len().unwrap_or(data.len() - valid);
                data = &data[valid + skip..];
            }
        }
    }
    out
}

fn decode(data: &[u8], label: &str, options: &ScanOptions) -> Result<String, PiiScanError> {
    match options.encoding {
        TextEncoding::Latin1 => {
            // Every byte is a valid Latin-1 code point, so the decode policy
            // never applies here.
            Ok(data.iter().map(|&b| b as char).collect())
        }
        TextEncoding::Utf8 => match options.decode_policy {
            DecodePolicy::Strict => match std::str::from_utf8(data) {
                Ok(text) => Ok(text.to_string()),
                Err(e) => Err(PiiScanError::DecodeError {
                    label: label.to_string(),
                    encoding: options.encoding.as_str().to_string(),
                    detail: e.to_string(),
                }),
            },
            DecodePolicy::Replace => Ok(String::from_utf8_lossy(data).into_owned()),
            DecodePolicy::Ignore => Ok(decode_utf8_ignoring_invalid(data)),
        },
    }
}

/// Splits decoded text into logical lines, treating `\n` and `\r\n`
/// uniformly. When `keep_newline` is false, trailing newline characters are
/// stripped from each line.
fn split_lines(text: &str, keep_newline: bool) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            let raw = &text[start..=i];
            lines.push(if keep_newline {
                raw
            } else {
                raw.trim_end_matches(['\r', '\n'])
            });
            start = i + 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Scans a decoded string into line records.
pub fn scan_text(
    text: &str,
    source_label: &str,
    options: &ScanOptions,
) -> Result<Vec<LineRecord>, PiiScanError> {
    options.check()?;

    let records = split_lines(text, options.keep_newline)
        .into_iter()
        .enumerate()
        .map(|(i, line)| LineRecord {
            source_label: source_label.to_string(),
            line_number: options.start_line + i as u32,
            text: line.to_string(),
        })
        .collect();
    Ok(records)
}

/// Scans in-memory bytes (e.g. uploaded content) into line records.
pub fn scan_bytes(
    data: &[u8],
    source_label: &str,
    options: &ScanOptions,
) -> Result<Vec<LineRecord>, PiiScanError> {
    options.check()?;
    let text = decode(data, source_label, options)?;
    scan_text(&text, source_label, options)
}

/// Scans any readable source into line records.
pub fn scan_reader<R: Read>(
    mut reader: R,
    source_label: &str,
    options: &ScanOptions,
) -> Result<Vec<LineRecord>, PiiScanError> {
    options.check()?;
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    scan_bytes(&buf, source_label, options)
}

/// Scans a file path into line records. The path itself is used as the
/// source label. A missing file is a hard error.
pub fn scan_path<P: AsRef<Path>>(
    path: P,
    options: &ScanOptions,
) -> Result<Vec<LineRecord>, PiiScanError> {
    options.check()?;
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    scan_bytes(&data, &path.display().to_string(), options)
}

/// Scans multiple file paths in sequence, preserving path order. With
/// `skip_missing`, paths that do not exist are skipped instead of failing
/// the whole batch.
pub fn scan_paths<P: AsRef<Path>>(
    paths: &[P],
    options: &ScanOptions,
    skip_missing: bool,
) -> Result<Vec<LineRecord>, PiiScanError> {
    options.check()?;
    let mut records = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if skip_missing && !path.exists() {
            debug!("Skipping missing source: {}", path.display());
            continue;
        }
        records.extend(scan_path(path, options)?);
    }
    Ok(records)
}
