use crate::error::ParserError;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

/// Cut points tried, newest first, when recovering a truncated payload
const MAX_RECOVERY_CUTS: usize = 16;

/// Which attempt produced the decoded value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    None,
    /// Trailing commas dropped, then typographic string delimiters straightened
    Syntax,
    /// Trimmed to a balanced prefix and closed
    Truncation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub value: Value,
    pub repair: Repair,
}

/// Parse a candidate payload, repairing common model mistakes on failure.
///
/// Attempts run in order: strict, trailing commas stripped, typographic
/// delimiters straightened as well, then truncation recovery on the fully
/// repaired text. The result is valid JSON of unknown shape.
pub fn parse_lenient(candidate: &str) -> Result<Parsed, ParserError> {
    let candidate = candidate.trim();

    let strict_err = match serde_json::from_str::<Value>(candidate) {
        Ok(value) => {
            return Ok(Parsed {
                value,
                repair: Repair::None,
            })
        }
        Err(e) => e,
    };
    debug!("Strict JSON parse failed: {}", strict_err);

    let without_commas = strip_trailing_commas(candidate);
    if let Ok(value) = serde_json::from_str::<Value>(&without_commas) {
        debug!("Recovered JSON after dropping trailing commas");
        return Ok(Parsed {
            value,
            repair: Repair::Syntax,
        });
    }

    let repaired = strip_trailing_commas(&normalize_quotes(candidate));
    if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
        debug!("Recovered JSON after straightening quotes");
        return Ok(Parsed {
            value,
            repair: Repair::Syntax,
        });
    }

    for prefix in balanced_prefixes(&repaired) {
        if let Ok(value) = serde_json::from_str::<Value>(&prefix) {
            debug!(
                "Recovered JSON from balanced prefix ({} of {} bytes)",
                prefix.len(),
                repaired.len()
            );
            return Ok(Parsed {
                value,
                repair: Repair::Truncation,
            });
        }
    }

    Err(ParserError::ParseFailed(strict_err.to_string()))
}

fn is_curly_double(c: char) -> bool {
    matches!(c, '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}')
}

/// Straighten typographic double quotes used as string delimiters.
///
/// Quotes inside a string literal are content and are left alone. A literal
/// opened by a typographic quote ends at the next double quote of either
/// kind; one opened by `"` ends only at `"`.
pub fn normalize_quotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Some(true) while inside a literal opened by a typographic quote
    let mut literal: Option<bool> = None;
    let mut escaped = false;

    for c in s.chars() {
        let curly = is_curly_double(c);
        match literal {
            None if c == '"' || curly => {
                literal = Some(curly);
                out.push('"');
            }
            None => out.push(c),
            Some(_) if escaped => {
                escaped = false;
                out.push(c);
            }
            Some(_) if c == '\\' => {
                escaped = true;
                out.push(c);
            }
            Some(opened_curly) if c == '"' || (curly && opened_curly) => {
                literal = None;
                out.push('"');
            }
            Some(_) => out.push(c),
        }
    }

    out
}

/// Drop commas that directly precede a closing bracket, outside string literals
pub fn strip_trailing_commas(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = s[i + 1..].trim_start().chars().next();
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Candidate texts for a truncated payload, most complete first.
///
/// The text is scanned outside string literals. A cut is possible after any
/// closing bracket, before any comma, and after an opening bracket that does
/// not start an array element; each cut is completed by
/// closing the brackets still open at that point. If the text ends on a
/// complete value it is also tried with its open brackets closed. Only the
/// last `MAX_RECOVERY_CUTS` cuts are kept while scanning.
fn balanced_prefixes(s: &str) -> Vec<String> {
    let mut stack: Vec<char> = Vec::new();
    let mut cuts: VecDeque<Cut> = VecDeque::with_capacity(MAX_RECOVERY_CUTS);
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' | '[' => {
                // An empty container is only a safe stand-in for a member
                // value; inside an array it would invent an element
                let member_value = stack.last() != Some(&']');
                stack.push(if c == '{' { '}' } else { ']' });
                if member_value {
                    push_cut(&mut cuts, i + 1, &stack);
                }
            }
            '}' | ']' => {
                if stack.last() != Some(&c) {
                    // Mismatched closer: nothing after this point is trustworthy
                    break;
                }
                stack.pop();
                if stack.is_empty() {
                    return vec![s[..=i].to_string()];
                }
                push_cut(&mut cuts, i + 1, &stack);
            }
            ',' if !stack.is_empty() => push_cut(&mut cuts, i, &stack),
            _ => {}
        }
    }

    let mut prefixes = Vec::new();
    if !in_string && !stack.is_empty() {
        prefixes.push(close(s.trim_end(), &stack));
    }
    prefixes.extend(cuts.iter().rev().map(|(end, open)| close(&s[..*end], open)));
    prefixes
}

/// End offset of a prefix and the closers it still needs, innermost last
type Cut = (usize, Vec<char>);

/// Record a cut, evicting the oldest once the ring is full
fn push_cut(cuts: &mut VecDeque<Cut>, end: usize, open: &[char]) {
    let mut closers = if cuts.len() == MAX_RECOVERY_CUTS {
        cuts.pop_front().map(|(_, closers)| closers).unwrap_or_default()
    } else {
        Vec::with_capacity(open.len())
    };
    closers.clear();
    closers.extend_from_slice(open);
    cuts.push_back((end, closers));
}

fn close(prefix: &str, open: &[char]) -> String {
    let mut out = String::with_capacity(prefix.len() + open.len());
    out.push_str(prefix);
    out.extend(open.iter().rev());
    out
}
