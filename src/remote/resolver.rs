// ABOUTME: RemoteAgentResolver - discovers remote agents by fetching their agent card.
// ABOUTME: The card lives at the locator plus a well-known path, overridable per resolver.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::transport::http_client;
use super::{AgentCard, RemoteAgentDefinition, WELL_KNOWN_AGENT_CARD_PATH};
use crate::error::ResolveError;
use crate::subagent::{SubagentDefinition, SubagentReference, SubagentResolver};

/// Default bound on one agent card fetch.
pub const DEFAULT_CARD_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolves `A2A` references over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteAgentResolver {
    http_client: reqwest::Client,
    card_path: String,
}

impl RemoteAgentResolver {
    pub fn new() -> Self {
        Self {
            http_client: http_client(DEFAULT_CARD_FETCH_TIMEOUT),
            card_path: WELL_KNOWN_AGENT_CARD_PATH.to_string(),
        }
    }

    /// Fetch cards from `path` instead of the well-known location.
    pub fn card_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.card_path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self
    }

    /// Give up on a card fetch after `timeout`. Replaces any custom client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_client = http_client(timeout);
        self
    }

    pub fn with_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// The card URL for a base locator.
    pub fn card_url(&self, locator: &str) -> String {
        format!("{}{}", locator.trim_end_matches('/'), self.card_path)
    }

    async fn fetch_card(&self, url: &str) -> Result<AgentCard, ResolveError> {
        let fetch = |source| ResolveError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.http_client.get(url).send().await.map_err(fetch)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.json::<AgentCard>().await.map_err(fetch)
    }
}

impl Default for RemoteAgentResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubagentResolver for RemoteAgentResolver {
    fn can_resolve(&self, reference: &SubagentReference) -> bool {
        reference.kind() == RemoteAgentDefinition::KIND
    }

    async fn resolve(
        &self,
        reference: &SubagentReference,
    ) -> Result<Arc<dyn SubagentDefinition>, ResolveError> {
        if !self.can_resolve(reference) {
            return Err(ResolveError::KindMismatch {
                expected: RemoteAgentDefinition::KIND.to_string(),
                actual: reference.kind().to_string(),
            });
        }

        let url = self.card_url(reference.locator());
        let card = self.fetch_card(&url).await?;
        tracing::debug!(name = %card.name, url = %url, "discovered remote agent");
        Ok(Arc::new(RemoteAgentDefinition::new(reference.clone(), card)))
    }
}
