use std::sync::{Arc, Mutex};

use super::AnalysisOutcome;

/// Slot holding the most recently completed analysis.
///
/// Publishing replaces the previous outcome outright; a run that finishes
/// later supersedes one that finished earlier, whatever order they started in.
#[derive(Debug, Default)]
pub struct LatestReport {
    slot: Mutex<Option<Arc<AnalysisOutcome>>>,
}

impl LatestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, outcome: AnalysisOutcome) -> Arc<AnalysisOutcome> {
        let outcome = Arc::new(outcome);
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(outcome.clone());
        outcome
    }

    pub fn current(&self) -> Option<Arc<AnalysisOutcome>> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Drop the surfaced outcome, e.g. when the user resets the form
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ProviderError;
    use crate::provider::{Agent, AgentResponse};
    use crate::report::Payload;
    use crate::runner::Analyzer;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers with the message it received after a fixed delay
    struct SlowEcho {
        delay: Duration,
    }

    #[async_trait]
    impl Agent for SlowEcho {
        fn name(&self) -> &'static str {
            "slow_echo"
        }

        async fn invoke(
            &self,
            message: &str,
            _agent_id: &str,
            _timeout: Duration,
        ) -> Result<AgentResponse, ProviderError> {
            tokio::time::sleep(self.delay).await;
            Ok(AgentResponse {
                payload: Payload::Decoded(serde_json::json!({ "executive_summary": message })),
                duration: self.delay,
            })
        }
    }

    #[tokio::test]
    async fn test_latest_completion_wins() {
        let config = Config::default();
        let slow = Analyzer::with_agent(&config, Arc::new(SlowEcho { delay: Duration::from_millis(200) }));
        let fast = Analyzer::with_agent(&config, Arc::new(SlowEcho { delay: Duration::from_millis(10) }));
        let latest = LatestReport::new();

        // The first request finishes last and must supersede the second
        let first = async {
            let outcome = slow.analyze("first", None).await.unwrap();
            latest.publish(outcome);
        };
        let second = async {
            let outcome = fast.analyze("second", None).await.unwrap();
            latest.publish(outcome);
        };
        tokio::join!(first, second);

        let current = latest.current().unwrap();
        assert_eq!(
            current.report.executive_summary,
            "Analyze the market for: first"
        );
    }

    #[tokio::test]
    async fn test_runs_are_independent() {
        let config = Config::default();
        let analyzer = Analyzer::with_agent(&config, Arc::new(SlowEcho { delay: Duration::ZERO }));

        let (a, b) = tokio::join!(analyzer.analyze("a", None), analyzer.analyze("b", None));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.report.executive_summary, "Analyze the market for: a");
        assert_eq!(b.report.executive_summary, "Analyze the market for: b");
    }

    #[test]
    fn test_clear() {
        let latest = LatestReport::new();
        assert!(latest.current().is_none());
        latest.publish(AnalysisOutcome {
            request_id: uuid::Uuid::new_v4(),
            report: crate::report::Report::default(),
            completed_at: chrono::Utc::now(),
            duration: Duration::ZERO,
        });
        assert!(latest.current().is_some());
        latest.clear();
        assert!(latest.current().is_none());
    }
}
