use crate::error::ParserError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Which rule located the candidate payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// The whole text is already valid JSON
    Whole,
    /// Body of a ```json fenced block
    Fenced,
    /// First opening bracket to last closing bracket
    Brackets,
    /// No boundary found, the whole text is handed on
    Verbatim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub candidate: &'a str,
    pub method: ExtractionMethod,
}

fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?is)```json\b[^\n]*\n?(.*?)```").ok())
        .as_ref()
}

/// Locate the most plausible JSON substring in model output.
///
/// Text that already parses as JSON is taken whole, so fence markers inside
/// its string values are never mistaken for a block. Otherwise prefers the
/// first non-empty ```json fenced block, then [`extract_brackets`].
pub fn extract_payload(raw: &str) -> Extracted<'_> {
    let trimmed = raw.trim();
    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Extracted {
            candidate: trimmed,
            method: ExtractionMethod::Whole,
        };
    }

    if let Some(re) = fence_regex() {
        for cap in re.captures_iter(raw) {
            if let Some(body) = cap.get(1) {
                let body = body.as_str().trim();
                if !body.is_empty() {
                    return Extracted {
                        candidate: body,
                        method: ExtractionMethod::Fenced,
                    };
                }
            }
        }
    }

    extract_brackets(raw).unwrap_or_else(|| {
        debug!("{}", ParserError::ExtractionAmbiguous(raw.len()));
        Extracted {
            candidate: raw,
            method: ExtractionMethod::Verbatim,
        }
    })
}

/// Span from the first `{`/`[` to the last `}`/`]`.
///
/// Deliberately not nesting aware. When no closing bracket follows the
/// opening one the span runs to the end of the text so truncated output
/// reaches the parser intact.
pub fn extract_brackets(raw: &str) -> Option<Extracted<'_>> {
    let start = raw.find(|c| c == '{' || c == '[')?;
    let end = raw
        .rfind(|c| c == '}' || c == ']')
        .filter(|&end| end > start)
        .map(|end| end + 1)
        .unwrap_or(raw.len());
    Some(Extracted {
        candidate: &raw[start..end],
        method: ExtractionMethod::Brackets,
    })
}
