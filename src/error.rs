use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Agent binary must not be empty")]
    EmptyBinary,

    #[error("Agent id must not be empty")]
    EmptyAgentId,

    #[error("retry.max_attempts must be at least 1")]
    NoAttempts,

    #[error("timeout_sec must be greater than zero")]
    ZeroTimeout,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Execution timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Process failed with exit code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Agent reported failure: {0}")]
    Agent(String),
}

/// Conditions raised while turning model text into a report.
///
/// Only `ParseFailed` ever travels as a value; the normalizer absorbs it and
/// the other two are logged where they occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("No JSON boundary found in {0} bytes of output")]
    ExtractionAmbiguous(usize),

    #[error("No JSON repair strategy succeeded: {0}")]
    ParseFailed(String),

    #[error("Field '{field}' has the wrong kind (expected {expected})")]
    ShapeMismatch {
        field: String,
        expected: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
