mod analyzer;
mod latest;
mod retry;

pub use analyzer::{compose_request, AnalysisOutcome, Analyzer};
pub use latest::LatestReport;
pub use retry::retry_with_backoff;
