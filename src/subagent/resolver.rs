// ABOUTME: The protocol seam - SubagentResolver turns references into definitions,
// ABOUTME: SubagentExecutor runs task requests against them. SubagentType pairs the two.

use std::sync::Arc;

use async_trait::async_trait;

use super::{SubagentDefinition, SubagentReference, TaskRequest};
use crate::error::{ExecutionError, ResolveError};

/// Translates references of one kind into definitions.
///
/// Resolution runs once per reference when the dispatcher is built, but a
/// rebuild may resolve the same reference again, so implementations must
/// give the same definition for the same locator.
#[async_trait]
pub trait SubagentResolver: Send + Sync {
    /// Whether this resolver handles the reference's kind.
    fn can_resolve(&self, reference: &SubagentReference) -> bool;

    /// Resolve the reference into a definition.
    async fn resolve(
        &self,
        reference: &SubagentReference,
    ) -> Result<Arc<dyn SubagentDefinition>, ResolveError>;
}

/// Runs task requests against definitions of one kind.
#[async_trait]
pub trait SubagentExecutor: Send + Sync {
    /// The kind of definition this executor runs.
    fn kind(&self) -> &str;

    /// Run the request and return the subagent's final text.
    async fn execute(
        &self,
        request: &TaskRequest,
        definition: &dyn SubagentDefinition,
    ) -> Result<String, ExecutionError>;
}

/// One resolver and one executor for the same kind: the unit of pluggability.
#[derive(Clone)]
pub struct SubagentType {
    resolver: Arc<dyn SubagentResolver>,
    executor: Arc<dyn SubagentExecutor>,
}

impl SubagentType {
    pub fn new(resolver: Arc<dyn SubagentResolver>, executor: Arc<dyn SubagentExecutor>) -> Self {
        Self { resolver, executor }
    }

    /// The kind served by this type's executor.
    pub fn kind(&self) -> &str {
        self.executor.kind()
    }

    pub fn resolver(&self) -> &Arc<dyn SubagentResolver> {
        &self.resolver
    }

    pub fn executor(&self) -> &Arc<dyn SubagentExecutor> {
        &self.executor
    }
}
