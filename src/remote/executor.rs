// ABOUTME: RemoteAgentExecutor - runs tasks on remote agents through an A2aTransport.
// ABOUTME: Sends the prompt as one user message and bounds the wait with a timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::protocol::Message;
use super::{A2aTransport, JsonRpcTransport, RemoteAgentDefinition};
use crate::error::{ExecutionError, RemoteError};
use crate::subagent::{SubagentDefinition, SubagentExecutor, TaskRequest};

/// Default bound on one remote call.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(60);

/// Executes `A2A` definitions.
#[derive(Clone)]
pub struct RemoteAgentExecutor {
    transport: Arc<dyn A2aTransport>,
    timeout: Duration,
}

impl RemoteAgentExecutor {
    pub fn new() -> Self {
        Self::with_transport(Arc::new(JsonRpcTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn A2aTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send(
        &self,
        definition: &RemoteAgentDefinition,
        prompt: &str,
    ) -> Result<String, RemoteError> {
        let message = Message::user_text(prompt);
        let result = tokio::time::timeout(
            self.timeout,
            self.transport.send_message(definition.endpoint(), message),
        )
        .await
        .map_err(|_| RemoteError::Timeout(self.timeout))??;
        result.into_text()
    }
}

impl Default for RemoteAgentExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubagentExecutor for RemoteAgentExecutor {
    fn kind(&self) -> &str {
        RemoteAgentDefinition::KIND
    }

    async fn execute(
        &self,
        request: &TaskRequest,
        definition: &dyn SubagentDefinition,
    ) -> Result<String, ExecutionError> {
        let definition = definition
            .as_any()
            .downcast_ref::<RemoteAgentDefinition>()
            .ok_or_else(|| ExecutionError::WrongDefinition {
                name: definition.name().to_string(),
                expected: RemoteAgentDefinition::KIND.to_string(),
            })?;

        match self.send(definition, &request.prompt).await {
            Ok(text) => {
                tracing::debug!(agent = definition.name(), bytes = text.len(), "remote agent replied");
                Ok(text)
            }
            Err(e) => {
                tracing::error!(agent = definition.name(), error = %e, "error sending message to remote agent");
                Err(e.into())
            }
        }
    }
}
