//! Keyword bucketing of free-text labels.
//!
//! Sentiment, severity, threat and priority labels are all free text chosen
//! by the model. Each axis owns one keyword table; lookup is the same
//! containment test for all of them, so the function is total by
//! construction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed classification outcome shared by every axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Positive,
    Negative,
    Neutral,
    #[default]
    Unknown,
}

/// Which keyword table to classify against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Sentiment,
    Severity,
    Threat,
    Priority,
}

struct KeywordTable {
    positive: &'static [&'static str],
    negative: &'static [&'static str],
    neutral: &'static [&'static str],
}

const SENTIMENT: KeywordTable = KeywordTable {
    positive: &["positive", "high", "good", "strong"],
    negative: &["negative", "low", "poor", "weak"],
    neutral: &["mixed", "neutral", "moderate", "medium", "cautious"],
};

// A low threat or severity is the favorable outcome
const THREAT: KeywordTable = KeywordTable {
    positive: &["low", "minor"],
    negative: &["high", "critical"],
    neutral: &["medium", "moderate"],
};

const PRIORITY: KeywordTable = KeywordTable {
    positive: &["low"],
    negative: &["high", "critical", "urgent"],
    neutral: &["medium", "moderate"],
};

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Sentiment, Axis::Severity, Axis::Threat, Axis::Priority];

    fn table(self) -> &'static KeywordTable {
        match self {
            Axis::Sentiment => &SENTIMENT,
            Axis::Severity | Axis::Threat => &THREAT,
            Axis::Priority => &PRIORITY,
        }
    }

    /// Bucket a label: positive keywords win over negative, negative over neutral
    pub fn classify(self, label: &str) -> Bucket {
        let label = label.to_lowercase();
        if label.trim().is_empty() {
            return Bucket::Unknown;
        }

        let table = self.table();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|k| label.contains(k));

        if contains_any(table.positive) {
            Bucket::Positive
        } else if contains_any(table.negative) {
            Bucket::Negative
        } else if contains_any(table.neutral) {
            Bucket::Neutral
        } else {
            Bucket::Unknown
        }
    }
}

/// Classify a sentiment label
pub fn classify(label: &str) -> Bucket {
    Axis::Sentiment.classify(label)
}

/// Classify a label that may be absent
pub fn classify_opt(label: Option<&str>) -> Bucket {
    label.map(classify).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Check,
    Cross,
    Dash,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Strong,
    Muted,
}

/// Presentation-agnostic marker for a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Indicator {
    pub icon: Icon,
    pub intensity: Intensity,
}

impl Bucket {
    pub fn indicator(self) -> Indicator {
        let (icon, intensity) = match self {
            Bucket::Positive => (Icon::Check, Intensity::Strong),
            Bucket::Negative => (Icon::Cross, Intensity::Strong),
            Bucket::Neutral => (Icon::Dash, Intensity::Muted),
            Bucket::Unknown => (Icon::Info, Intensity::Muted),
        };
        Indicator { icon, intensity }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Positive => write!(f, "positive"),
            Bucket::Negative => write!(f, "negative"),
            Bucket::Neutral => write!(f, "neutral"),
            Bucket::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Sentiment => write!(f, "sentiment"),
            Axis::Severity => write!(f, "severity"),
            Axis::Threat => write!(f, "threat"),
            Axis::Priority => write!(f, "priority"),
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sentiment" => Ok(Axis::Sentiment),
            "severity" => Ok(Axis::Severity),
            "threat" | "threat_level" => Ok(Axis::Threat),
            "priority" => Ok(Axis::Priority),
            _ => Err(format!("Unknown axis: {}", s)),
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Icon::Check => write!(f, "check"),
            Icon::Cross => write!(f, "cross"),
            Icon::Dash => write!(f, "dash"),
            Icon::Info => write!(f, "info"),
        }
    }
}
