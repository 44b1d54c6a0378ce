mod command;

pub use command::CommandAgent;

use crate::config::Config;
use crate::error::ProviderError;
use crate::report::Payload;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Shown when the agent fails without saying why
const GENERIC_FAILURE: &str = "Analysis failed. Please try again.";

#[derive(Debug)]
pub struct AgentResponse {
    pub payload: Payload,
    pub duration: Duration,
}

/// A model-invocation service: takes a request and an agent id, returns
/// the model's output as raw text or an already decoded value
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &'static str;

    async fn invoke(
        &self,
        message: &str,
        agent_id: &str,
        timeout: Duration,
    ) -> Result<AgentResponse, ProviderError>;
}

/// Create the agent described by the config
pub fn create_agent(config: &Config) -> Arc<dyn Agent> {
    Arc::new(CommandAgent {
        binary: config.agent.binary.clone(),
        args: config.agent.args.clone(),
    })
}

/// `{"success": .., "response": {"result": .., "message": ..}, "error": ..}`
#[derive(Deserialize)]
struct AgentEnvelope {
    success: bool,
    #[serde(default)]
    response: Option<EnvelopeResponse>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct EnvelopeResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret what an agent printed.
///
/// A success envelope yields its `response.result`; a failure envelope
/// becomes `ProviderError::Agent`. Anything else is raw model text.
pub fn read_agent_output(stdout: &str) -> Result<Payload, ProviderError> {
    let envelope = match serde_json::from_str::<AgentEnvelope>(stdout.trim()) {
        Ok(envelope) => envelope,
        Err(_) => return Ok(Payload::Text(stdout.to_string())),
    };

    match (envelope.success, envelope.response) {
        (true, Some(response)) => Ok(match response.result {
            Some(Value::String(text)) => Payload::Text(text),
            Some(value) => Payload::Decoded(value),
            None => Payload::Decoded(Value::Null),
        }),
        (_, response) => {
            let message = envelope
                .error
                .or_else(|| response.and_then(|r| r.message))
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            Err(ProviderError::Agent(message))
        }
    }
}
