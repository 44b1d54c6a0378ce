use crate::config::{Config, RetryConfig};
use crate::error::{AnalysisError, ProviderError};
use crate::provider::{create_agent, Agent};
use crate::report::{normalize, Report};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::retry::retry_with_backoff;

/// Result of one completed analysis
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub request_id: Uuid,
    pub report: Report,
    pub completed_at: DateTime<Utc>,
    pub duration: Duration,
}

/// Build the request sent to the agent
pub fn compose_request(query: &str, context: Option<&str>) -> Result<String, AnalysisError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AnalysisError::EmptyQuery);
    }

    let mut message = format!("Analyze the market for: {}", query);
    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        message.push_str(&format!("\n\nAdditional context: {}", context));
    }
    Ok(message)
}

/// Runs one analysis: compose, invoke the agent with retries, normalize.
///
/// Each call is independent; callers that start several analyses decide
/// which outcome to surface (see [`super::LatestReport`]).
pub struct Analyzer {
    agent: Arc<dyn Agent>,
    agent_id: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self::with_agent(config, create_agent(config))
    }

    pub fn with_agent(config: &Config, agent: Arc<dyn Agent>) -> Self {
        Self {
            agent,
            agent_id: config.agent.agent_id.clone(),
            timeout: config.timeout(),
            retry: config.retry.clone(),
        }
    }

    pub async fn analyze(
        &self,
        query: &str,
        context: Option<&str>,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let message = compose_request(query, context)?;
        let request_id = Uuid::new_v4();
        let start = std::time::Instant::now();

        info!("Starting analysis {} via {} agent", request_id, self.agent.name());

        // The agent ran and declined: asking again will not help
        let retryable = |e: &ProviderError| !matches!(e, ProviderError::Agent(_));
        let response = retry_with_backoff(&self.retry, retryable, || {
            self.agent.invoke(&message, &self.agent_id, self.timeout)
        })
        .await?;

        debug!(
            "Agent answered in {:.1}s",
            response.duration.as_secs_f64()
        );

        let report = normalize(response.payload);
        Ok(AnalysisOutcome {
            request_id,
            report,
            completed_at: Utc::now(),
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::AgentResponse;
    use crate::report::Payload;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct ScriptedAgent {
        replies: Mutex<Vec<Result<Payload, ProviderError>>>,
        calls: AtomicU32,
        last_message: Mutex<Option<String>>,
    }

    impl ScriptedAgent {
        fn new(replies: Vec<Result<Payload, ProviderError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                calls: AtomicU32::new(0),
                last_message: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl Agent for ScriptedAgent {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn invoke(
            &self,
            message: &str,
            _agent_id: &str,
            _timeout: Duration,
        ) -> Result<AgentResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_message.lock().unwrap() = Some(message.to_string());
            let payload = self.replies.lock().unwrap().remove(0)?;
            Ok(AgentResponse {
                payload,
                duration: Duration::ZERO,
            })
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.retry.backoff_base_ms = 1;
        config
    }

    #[test]
    fn test_compose_request() {
        assert_eq!(
            compose_request("  AI code editors ", None).unwrap(),
            "Analyze the market for: AI code editors"
        );
        assert_eq!(
            compose_request("editors", Some(" B2B focus ")).unwrap(),
            "Analyze the market for: editors\n\nAdditional context: B2B focus"
        );
        assert_eq!(
            compose_request("editors", Some("   ")).unwrap(),
            "Analyze the market for: editors"
        );
    }

    #[test]
    fn test_compose_rejects_blank_query() {
        assert!(matches!(
            compose_request("   ", Some("ctx")),
            Err(AnalysisError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn test_analyze_normalizes_text() {
        let agent = ScriptedAgent::new(vec![Ok(Payload::Text(
            "Report:\n```json\n{\"executive_summary\": \"Growing\"}\n```".to_string(),
        ))]);
        let analyzer = Analyzer::with_agent(&config(), agent.clone());

        let outcome = analyzer.analyze("widgets", None).await.unwrap();
        assert_eq!(outcome.report.executive_summary, "Growing");
        assert_eq!(outcome.report.overall_sentiment.web_sentiment, "N/A");
        assert_eq!(
            agent.last_message.lock().unwrap().as_deref(),
            Some("Analyze the market for: widgets")
        );
    }

    #[tokio::test]
    async fn test_unparseable_output_is_not_an_error() {
        let agent = ScriptedAgent::new(vec![Ok(Payload::Text("I am unable to help.".into()))]);
        let analyzer = Analyzer::with_agent(&config(), agent);

        let outcome = analyzer.analyze("widgets", None).await.unwrap();
        assert_eq!(outcome.report, Report::default());
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let agent = ScriptedAgent::new(vec![
            Err(ProviderError::Timeout(Duration::from_secs(1))),
            Ok(Payload::Decoded(serde_json::json!({"executive_summary": "ok"}))),
        ]);
        let analyzer = Analyzer::with_agent(&config(), agent.clone());

        let outcome = analyzer.analyze("widgets", None).await.unwrap();
        assert_eq!(outcome.report.executive_summary, "ok");
        assert_eq!(agent.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_agent_failure_is_surfaced_without_retry() {
        let agent = ScriptedAgent::new(vec![Err(ProviderError::Agent("quota".into()))]);
        let analyzer = Analyzer::with_agent(&config(), agent.clone());

        let err = analyzer.analyze("widgets", None).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Provider(ProviderError::Agent(_))));
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_query_skips_agent() {
        let agent = ScriptedAgent::new(vec![]);
        let analyzer = Analyzer::with_agent(&config(), agent.clone());

        assert!(analyzer.analyze(" ", None).await.is_err());
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }
}
