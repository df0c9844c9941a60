// ABOUTME: LocalAgentResolver - loads and parses local agent documents.
// ABOUTME: "builtin:" locators are served from the embedded documents.

use std::sync::Arc;

use async_trait::async_trait;

use super::builtin::{self, BUILTIN_PREFIX};
use super::{Document, DocumentSource, FileSystemSource, LocalAgentDefinition};
use crate::error::ResolveError;
use crate::subagent::{SubagentDefinition, SubagentReference, SubagentResolver};

/// Resolves `LOCAL` references through a document source.
#[derive(Clone)]
pub struct LocalAgentResolver {
    source: Arc<dyn DocumentSource>,
}

impl LocalAgentResolver {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }

    async fn load(&self, locator: &str) -> Result<String, ResolveError> {
        match locator.strip_prefix(BUILTIN_PREFIX) {
            Some(name) => builtin::document(name)
                .map(str::to_string)
                .ok_or_else(|| ResolveError::UnknownDocument(locator.to_string())),
            None => self.source.load(locator).await,
        }
    }
}

impl Default for LocalAgentResolver {
    fn default() -> Self {
        Self::new(Arc::new(FileSystemSource))
    }
}

#[async_trait]
impl SubagentResolver for LocalAgentResolver {
    fn can_resolve(&self, reference: &SubagentReference) -> bool {
        reference.kind() == LocalAgentDefinition::KIND
    }

    async fn resolve(
        &self,
        reference: &SubagentReference,
    ) -> Result<Arc<dyn SubagentDefinition>, ResolveError> {
        if !self.can_resolve(reference) {
            return Err(ResolveError::KindMismatch {
                expected: LocalAgentDefinition::KIND.to_string(),
                actual: reference.kind().to_string(),
            });
        }

        let text = self.load(reference.locator()).await?;
        let definition =
            LocalAgentDefinition::from_document(reference.clone(), Document::parse(&text))?;
        tracing::debug!(
            name = definition.name(),
            locator = reference.locator(),
            "resolved local agent"
        );
        Ok(Arc::new(definition))
    }
}
