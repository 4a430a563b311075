// piiscan-core/src/redaction.rs
//! Utilities that keep raw PII values out of log output.
//!
//! Logs may be persisted or shared, so any finding-bearing structure must
//! pass through [`sanitize_for_log`] before it is written, and the debug
//! helpers here redact values unless explicitly allowed via an environment
//! gate.
//!
//! License: MIT OR Apache-2.0

use lazy_static::lazy_static;
use log::debug;
use serde_json::Value;

/// Key that holds the actual PII value in finding payloads.
pub const PII_VALUE_KEY: &str = "value";

/// Placeholder used in logs instead of real values.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PIISCAN_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Replaces a sensitive value with a loggable placeholder that leaks only
/// the length of longer values.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        REDACTED_PLACEHOLDER.to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

/// Debug-logs one finding with its value redacted (unless the env gate
/// allows raw PII).
pub fn log_finding_debug(module_path: &str, pii_type: &str, value: &str) {
    debug!(
        "{} Found PII match: type='{}', value='{}'",
        module_path,
        pii_type,
        get_loggable_content(value)
    );
}

/// Returns a copy of the payload safe for logging: every `"value"` field is
/// replaced with [`REDACTED_PLACEHOLDER`], recursively through objects and
/// arrays.
pub fn sanitize_for_log(payload: &Value) -> Value {
    match payload {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                if k == PII_VALUE_KEY {
                    out.insert(k.clone(), Value::String(REDACTED_PLACEHOLDER.to_string()));
                } else {
                    out.insert(k.clone(), sanitize_for_log(v));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sanitize_for_log).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn sanitize_masks_value_fields_recursively() {
        let payload = json!({
            "scored_items": [
                {"type": "email", "value": "a@b.com", "line_number": 3},
                {"type": "phone", "value": "5551234567", "nested": {"value": "x"}}
            ],
            "score": 85.0
        });
        let safe = sanitize_for_log(&payload);
        assert_eq!(safe["scored_items"][0]["value"], "[REDACTED]");
        assert_eq!(safe["scored_items"][1]["value"], "[REDACTED]");
        assert_eq!(safe["scored_items"][1]["nested"]["value"], "[REDACTED]");
        assert_eq!(safe["scored_items"][0]["line_number"], 3);
        assert_eq!(safe["score"], 85.0);
    }
}
