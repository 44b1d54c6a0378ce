mod normalize;

pub use normalize::{normalize, normalize_text, normalize_value, Payload};

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

/// Placeholder for record fields the model left out
pub const NOT_AVAILABLE: &str = "N/A";

const SAMPLE_REPORT: &str = include_str!("sample.json");

/// Top-level keys, in every accepted spelling
pub(crate) const EXECUTIVE_SUMMARY: &[&str] = &["executive_summary", "executiveSummary", "summary"];
pub(crate) const OVERALL_SENTIMENT: &[&str] = &["overall_sentiment", "overallSentiment", "sentiment"];
pub(crate) const MARKET_LANDSCAPE: &[&str] = &["market_landscape", "marketLandscape", "landscape"];
pub(crate) const DEVELOPER_PULSE: &[&str] = &[
    "developer_community_pulse",
    "developerCommunityPulse",
    "developer_pulse",
    "developerPulse",
];
pub(crate) const RISKS: &[&str] = &["risks_and_concerns", "risksAndConcerns", "risks"];
pub(crate) const RECOMMENDATIONS: &[&str] = &[
    "strategic_recommendations",
    "strategicRecommendations",
    "recommendations",
];

/// Whether a decoded value carries any of the report's top-level keys
pub fn looks_like_report(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    [
        EXECUTIVE_SUMMARY,
        OVERALL_SENTIMENT,
        MARKET_LANDSCAPE,
        DEVELOPER_PULSE,
        RISKS,
        RECOMMENDATIONS,
    ]
    .iter()
    .flat_map(|keys| keys.iter())
    .any(|key| map.contains_key(*key))
}

/// A market research report with every field present.
///
/// Built in one step by the normalizer and never mutated afterwards.
/// Serializes with the snake_case keys the model is asked to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Report {
    pub executive_summary: String,
    pub overall_sentiment: OverallSentiment,
    pub market_landscape: MarketLandscape,
    #[serde(rename = "developer_community_pulse")]
    pub developer_pulse: DeveloperPulse,
    #[serde(rename = "risks_and_concerns")]
    pub risks: Vec<Risk>,
    #[serde(rename = "strategic_recommendations")]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct OverallSentiment {
    pub web_sentiment: String,
    pub developer_sentiment: String,
    pub combined_rating: String,
    pub sentiment_summary: String,
}

impl Default for OverallSentiment {
    fn default() -> Self {
        Self {
            web_sentiment: NOT_AVAILABLE.to_string(),
            developer_sentiment: NOT_AVAILABLE.to_string(),
            combined_rating: NOT_AVAILABLE.to_string(),
            sentiment_summary: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct MarketLandscape {
    pub overview: String,
    #[serde(rename = "key_competitors")]
    pub competitors: Vec<Competitor>,
    #[serde(rename = "market_trends")]
    pub trends: Vec<String>,
    pub recent_news: Vec<NewsItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DeveloperPulse {
    pub sentiment_overview: String,
    #[serde(rename = "key_themes")]
    pub themes: Vec<String>,
    #[serde(rename = "notable_opinions")]
    pub opinions: Vec<Opinion>,
    pub discussion_activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Competitor {
    pub name: String,
    pub positioning: String,
    pub threat_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct NewsItem {
    pub headline: String,
    pub source: String,
    pub relevance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Opinion {
    pub opinion: String,
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Risk {
    pub concern: String,
    pub severity: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Recommendation {
    pub recommendation: String,
    pub priority: String,
    pub rationale: String,
}

fn na() -> String {
    NOT_AVAILABLE.to_string()
}

impl Default for Competitor {
    fn default() -> Self {
        Self {
            name: na(),
            positioning: na(),
            threat_level: na(),
        }
    }
}

impl Default for NewsItem {
    fn default() -> Self {
        Self {
            headline: na(),
            source: na(),
            relevance: na(),
        }
    }
}

impl Default for Opinion {
    fn default() -> Self {
        Self {
            opinion: na(),
            sentiment: na(),
        }
    }
}

impl Default for Risk {
    fn default() -> Self {
        Self {
            concern: na(),
            severity: na(),
            source: na(),
        }
    }
}

impl Default for Recommendation {
    fn default() -> Self {
        Self {
            recommendation: na(),
            priority: na(),
            rationale: na(),
        }
    }
}

impl Report {
    /// The demonstration report shown before any analysis has run
    pub fn sample() -> Self {
        normalize_text(SAMPLE_REPORT)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
