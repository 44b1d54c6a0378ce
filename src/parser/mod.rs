mod extract;
mod json;

pub use extract::{extract_brackets, extract_payload, ExtractionMethod, Extracted};
pub use json::{normalize_quotes, parse_lenient, strip_trailing_commas, Parsed, Repair};

use crate::error::ParserError;
use crate::report::looks_like_report;
use serde_json::Value;
use tracing::debug;

/// Envelopes unwrapped before giving up and using the value as-is
const MAX_ENVELOPE_DEPTH: usize = 3;

/// Extract and leniently parse the JSON payload in raw model output
pub fn parse_payload(raw: &str) -> Result<Value, ParserError> {
    parse_at_depth(raw, 0)
}

fn parse_at_depth(raw: &str, depth: usize) -> Result<Value, ParserError> {
    let extracted = extract_payload(raw);
    debug!(
        "Extracted {} byte candidate via {:?}",
        extracted.candidate.len(),
        extracted.method
    );

    let parsed = match parse_lenient(extracted.candidate) {
        Ok(parsed) => parsed,
        // A fence can be mentioned in prose around the real payload
        Err(e) if extracted.method == ExtractionMethod::Fenced => {
            let Some(brackets) = extract_brackets(raw) else {
                return Err(e);
            };
            debug!("Fenced block did not parse: {}; trying bracket span", e);
            parse_lenient(brackets.candidate)?
        }
        Err(e) => return Err(e),
    };
    Ok(unwrap_at_depth(parsed.value, depth))
}

/// Runners wrap the model text as `{"result": ...}`, sometimes nested
/// under `"response"`. Unwrap that when the object is not a report itself.
pub(crate) fn unwrap_envelope(value: Value) -> Value {
    unwrap_at_depth(value, 0)
}

fn unwrap_at_depth(value: Value, depth: usize) -> Value {
    if depth >= MAX_ENVELOPE_DEPTH || looks_like_report(&value) {
        return value;
    }

    let inner = value
        .get("result")
        .or_else(|| value.get("response").and_then(|r| r.get("result")));

    match inner {
        Some(Value::String(text)) => match parse_at_depth(text, depth + 1) {
            Ok(unwrapped) => unwrapped,
            Err(e) => {
                debug!("Envelope result is not JSON: {}", e);
                value
            }
        },
        Some(object) if object.is_object() => unwrap_at_depth(object.clone(), depth + 1),
        _ => value,
    }
}
