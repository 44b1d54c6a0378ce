use super::{read_agent_output, Agent, AgentResponse};
use crate::error::ProviderError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::debug;

/// Runs an agent CLI as a child process and reads its stdout
pub struct CommandAgent {
    pub binary: PathBuf,
    pub args: Vec<String>,
}

#[async_trait]
impl Agent for CommandAgent {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn invoke(
        &self,
        message: &str,
        agent_id: &str,
        timeout: Duration,
    ) -> Result<AgentResponse, ProviderError> {
        // Use string for PATH lookup if not an absolute/relative path
        let binary_str = self.binary.to_string_lossy();
        let mut cmd = if binary_str.contains('/') || binary_str.contains('\\') {
            Command::new(&self.binary)
        } else {
            Command::new(binary_str.as_ref())
        };

        cmd.args(&self.args)
            .arg("--agent")
            .arg(agent_id)
            .arg(message)
            .kill_on_drop(true);

        debug!("Invoking agent {} via {:?}", agent_id, self.binary);
        let start = std::time::Instant::now();

        let output = tokio_timeout(timeout, cmd.output())
            .await
            .map_err(|_| ProviderError::Timeout(timeout))?
            .map_err(ProviderError::Io)?;

        if !output.status.success() {
            return Err(ProviderError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(AgentResponse {
            payload: read_agent_output(&stdout)?,
            duration: start.elapsed(),
        })
    }
}
