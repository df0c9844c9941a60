// ABOUTME: LocalAgentExecutor - runs local agents through the SubAgent think-act loop.
// ABOUTME: Builds the system prompt, scopes the baseline tools, and routes the model.

use std::sync::Arc;

use async_trait::async_trait;

use super::runner::{DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS, SubAgent};
use super::{DEFAULT_PERMISSION_MODE, LocalAgentDefinition, SkillLibrary};
use crate::error::ExecutionError;
use crate::llm::ModelRouter;
use crate::subagent::{SubagentDefinition, SubagentExecutor, TaskRequest};
use crate::tool::{FilteredRegistry, Registry};

/// Executes `LOCAL` definitions.
pub struct LocalAgentExecutor {
    tools: Registry,
    router: ModelRouter,
    skills: Arc<SkillLibrary>,
    max_iterations: usize,
    max_tokens: u32,
}

impl LocalAgentExecutor {
    /// Create an executor over a baseline tool registry and a model router.
    pub fn new(tools: Registry, router: ModelRouter) -> Self {
        Self {
            tools,
            router,
            skills: Arc::new(SkillLibrary::new()),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Knowledge modules agents may name in their `skills` header.
    pub fn skills(mut self, skills: Arc<SkillLibrary>) -> Self {
        self.skills = skills;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The definition body followed by each named skill that exists.
    pub fn system_prompt(&self, definition: &LocalAgentDefinition) -> String {
        let mut prompt = definition.content().to_string();
        for name in definition.skills() {
            match self.skills.get(&name) {
                Some(skill) => {
                    prompt.push_str("\n\n");
                    prompt.push_str(&skill.content);
                }
                None => {
                    tracing::debug!(agent = definition.name(), skill = %name, "skill not found, skipping");
                }
            }
        }
        prompt
    }

    /// The baseline registry narrowed to what the definition allows.
    pub fn scoped_tools(&self, definition: &LocalAgentDefinition) -> FilteredRegistry {
        FilteredRegistry::new(self.tools.clone())
            .allowed(definition.tools())
            .denied(definition.disallowed_tools())
    }
}

#[async_trait]
impl SubagentExecutor for LocalAgentExecutor {
    fn kind(&self) -> &str {
        LocalAgentDefinition::KIND
    }

    async fn execute(
        &self,
        request: &TaskRequest,
        definition: &dyn SubagentDefinition,
    ) -> Result<String, ExecutionError> {
        let definition = definition
            .as_any()
            .downcast_ref::<LocalAgentDefinition>()
            .ok_or_else(|| ExecutionError::WrongDefinition {
                name: definition.name().to_string(),
                expected: LocalAgentDefinition::KIND.to_string(),
            })?;

        if definition.permission_mode() != DEFAULT_PERMISSION_MODE {
            tracing::warn!(
                agent = definition.name(),
                permission_mode = definition.permission_mode(),
                "permission mode is not supported yet, running with default"
            );
        }

        let declared = request.model.as_deref().or(definition.model());
        let route = self.router.route(declared);
        tracing::debug!(
            agent = definition.name(),
            provider = %route.provider,
            model = %route.model,
            "running local agent"
        );

        let mut agent = SubAgent::new(
            self.system_prompt(definition),
            route.model,
            route.client,
            self.scoped_tools(definition),
        )
        .max_iterations(self.max_iterations)
        .max_tokens(self.max_tokens);

        let result = agent.run(&request.prompt).await?;
        tracing::debug!(
            agent = definition.name(),
            agent_id = %result.agent_id,
            iterations = result.iterations,
            tool_use_count = result.tool_use_count,
            "local agent finished"
        );
        Ok(result.content)
    }
}
