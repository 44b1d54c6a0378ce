//! Total normalization of untrusted model output into a [`Report`].
//!
//! Every function here is defined for every input. Missing fields, `null`,
//! and values of the wrong kind fall back to the field's default; sequence
//! elements are coerced one by one and never dropped.

use super::*;
use crate::error::ParserError;
use crate::parser::{parse_payload, unwrap_envelope};
use serde_json::{Map, Value};
use tracing::{trace, warn};

/// Model output as handed over by the invocation layer
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw text that still needs extraction and parsing
    Text(String),
    /// A value the caller already decoded
    Decoded(Value),
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Decoded(value)
    }
}

/// Turn any model output into a report. Never fails.
pub fn normalize(payload: impl Into<Payload>) -> Report {
    match payload.into() {
        Payload::Text(text) => normalize_text(&text),
        Payload::Decoded(value) => normalize_value(&value),
    }
}

/// Extract, parse and normalize raw model text
pub fn normalize_text(raw: &str) -> Report {
    match parse_payload(raw) {
        Ok(value) => build(&value),
        Err(e) => {
            warn!("{}; falling back to an all-default report", e);
            Report::default()
        }
    }
}

/// Normalize an already decoded value. A string value is treated as raw text.
pub fn normalize_value(value: &Value) -> Report {
    match value {
        Value::String(text) => normalize_text(text),
        other => build(&unwrap_envelope(other.clone())),
    }
}

fn build(value: &Value) -> Report {
    let root = Fields::of(Some(value));
    if root.map.is_none() {
        mismatch(&["report"], "object");
    }

    let sentiment = root.section(OVERALL_SENTIMENT);
    let landscape = root.section(MARKET_LANDSCAPE);
    let pulse = root.section(DEVELOPER_PULSE);

    Report {
        executive_summary: root.text(EXECUTIVE_SUMMARY, ""),
        overall_sentiment: OverallSentiment {
            web_sentiment: sentiment.text(&["web_sentiment", "webSentiment"], NOT_AVAILABLE),
            developer_sentiment: sentiment.text(
                &["developer_sentiment", "developerSentiment"],
                NOT_AVAILABLE,
            ),
            combined_rating: sentiment.text(&["combined_rating", "combinedRating"], NOT_AVAILABLE),
            sentiment_summary: sentiment.text(&["sentiment_summary", "sentimentSummary"], ""),
        },
        market_landscape: MarketLandscape {
            overview: landscape.text(&["overview"], ""),
            competitors: landscape.list(
                &["key_competitors", "keyCompetitors", "competitors"],
                Competitor::coerce,
            ),
            trends: landscape.list(&["market_trends", "marketTrends", "trends"], coerce_item_text),
            recent_news: landscape.list(&["recent_news", "recentNews", "news"], NewsItem::coerce),
        },
        developer_pulse: DeveloperPulse {
            sentiment_overview: pulse.text(&["sentiment_overview", "sentimentOverview"], ""),
            themes: pulse.list(&["key_themes", "keyThemes", "themes"], coerce_item_text),
            opinions: pulse.list(
                &["notable_opinions", "notableOpinions", "opinions"],
                Opinion::coerce,
            ),
            discussion_activity: pulse.text(&["discussion_activity", "discussionActivity"], ""),
        },
        risks: root.list(RISKS, Risk::coerce),
        recommendations: root.list(RECOMMENDATIONS, Recommendation::coerce),
    }
}

/// View over an object that may not exist or may not be an object at all
#[derive(Clone, Copy)]
struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    fn of(value: Option<&'a Value>) -> Self {
        Self {
            map: value.and_then(Value::as_object),
        }
    }

    /// First non-null value under any of the accepted spellings
    fn get(&self, keys: &[&str]) -> Option<&'a Value> {
        let map = self.map?;
        keys.iter()
            .filter_map(|key| map.get(*key))
            .find(|value| !value.is_null())
    }

    fn section(&self, keys: &[&str]) -> Fields<'a> {
        let value = self.get(keys);
        if matches!(value, Some(v) if !v.is_object()) {
            mismatch(keys, "object");
        }
        Fields::of(value)
    }

    fn text(&self, keys: &[&str], default: &str) -> String {
        match self.get(keys) {
            None => default.to_string(),
            Some(value) => coerce_text(value).unwrap_or_else(|| {
                mismatch(keys, "string");
                default.to_string()
            }),
        }
    }

    fn list<T>(&self, keys: &[&str], item: impl Fn(&Value) -> T) -> Vec<T> {
        match self.get(keys) {
            Some(Value::Array(items)) => items.iter().map(item).collect(),
            Some(_) => {
                mismatch(keys, "array");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

fn mismatch(keys: &[&str], expected: &'static str) {
    let field = keys.first().copied().unwrap_or_default().to_string();
    trace!("{}", ParserError::ShapeMismatch { field, expected });
}

/// Strings pass through; numbers and booleans keep their JSON text
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_item_text(value: &Value) -> String {
    coerce_text(value).unwrap_or_default()
}

/// A sequence element coerced field by field
trait Record: Default {
    /// Record for a bare string element, which fills the primary field
    fn from_text(text: String) -> Self;

    fn from_fields(fields: Fields<'_>) -> Self;

    fn coerce(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::from_text(text.clone()),
            Value::Object(_) => Self::from_fields(Fields::of(Some(value))),
            _ => Self::default(),
        }
    }
}

impl Record for Competitor {
    fn from_text(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn from_fields(f: Fields<'_>) -> Self {
        Self {
            name: f.text(&["name"], NOT_AVAILABLE),
            positioning: f.text(&["positioning"], NOT_AVAILABLE),
            threat_level: f.text(&["threat_level", "threatLevel", "threat"], NOT_AVAILABLE),
        }
    }
}

impl Record for NewsItem {
    fn from_text(headline: String) -> Self {
        Self {
            headline,
            ..Self::default()
        }
    }

    fn from_fields(f: Fields<'_>) -> Self {
        Self {
            headline: f.text(&["headline", "title"], NOT_AVAILABLE),
            source: f.text(&["source"], NOT_AVAILABLE),
            relevance: f.text(&["relevance"], NOT_AVAILABLE),
        }
    }
}

impl Record for Opinion {
    fn from_text(opinion: String) -> Self {
        Self {
            opinion,
            ..Self::default()
        }
    }

    fn from_fields(f: Fields<'_>) -> Self {
        Self {
            opinion: f.text(&["opinion", "quote"], NOT_AVAILABLE),
            sentiment: f.text(&["sentiment"], NOT_AVAILABLE),
        }
    }
}

impl Record for Risk {
    fn from_text(concern: String) -> Self {
        Self {
            concern,
            ..Self::default()
        }
    }

    fn from_fields(f: Fields<'_>) -> Self {
        Self {
            concern: f.text(&["concern", "risk"], NOT_AVAILABLE),
            severity: f.text(&["severity"], NOT_AVAILABLE),
            source: f.text(&["source"], NOT_AVAILABLE),
        }
    }
}

impl Record for Recommendation {
    fn from_text(recommendation: String) -> Self {
        Self {
            recommendation,
            ..Self::default()
        }
    }

    fn from_fields(f: Fields<'_>) -> Self {
        Self {
            recommendation: f.text(&["recommendation"], NOT_AVAILABLE),
            priority: f.text(&["priority"], NOT_AVAILABLE),
            rationale: f.text(&["rationale"], NOT_AVAILABLE),
        }
    }
}
