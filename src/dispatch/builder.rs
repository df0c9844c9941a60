// ABOUTME: DispatcherBuilder - resolves references into definitions and wires executors.
// ABOUTME: Every configuration problem surfaces here, before any task can run.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::{BackgroundTaskStore, Dispatcher};
use crate::config::DispatchConfig;
use crate::error::ConfigError;
use crate::local::{self, LocalAgentDefinition, builtin};
use crate::subagent::{SubagentDefinition, SubagentReference, SubagentType};

/// Placeholder replaced by the subagent catalog in the task tool description.
pub const AGENTS_PLACEHOLDER: &str = "{agents}";

/// Default description of the `task` tool.
pub const DEFAULT_TASK_DESCRIPTION: &str = "\
Launch a new agent to handle complex, multi-step tasks autonomously.

Each agent type has specific capabilities and tools available to it.

Available agent types:
{agents}

When using this tool, you must specify a subagent_type parameter to select which agent type to use.

Usage notes:
- Always include a short description (3-5 words) summarizing what the agent will do
- Launch multiple agents concurrently whenever possible, using a single message with multiple tool uses
- When the agent is done, it will return a single message back to you. The result is not visible to the user; send the user a concise summary of it
- You can run agents in the background with the run_in_background parameter. The tool then returns a task_id immediately; use the task_output tool with that task_id to check status and retrieve results
- Each invocation starts fresh, so provide a detailed prompt with all necessary context
- Clearly tell the agent whether you expect it to write code or only to do research";

/// What to do when two references resolve to the same subagent name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail the build.
    #[default]
    Reject,
    /// Keep the definition resolved last.
    LastWins,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "last-wins" | "last_wins" => Ok(Self::LastWins),
            other => Err(other.to_string()),
        }
    }
}

/// Builds a [`Dispatcher`].
pub struct DispatcherBuilder {
    references: Vec<SubagentReference>,
    types: Vec<SubagentType>,
    template: String,
    store: Option<Arc<BackgroundTaskStore>>,
    task_ttl: Option<Duration>,
    duplicate_policy: DuplicatePolicy,
    builtin_agents: bool,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            references: Vec::new(),
            types: Vec::new(),
            template: DEFAULT_TASK_DESCRIPTION.to_string(),
            store: None,
            task_ttl: None,
            duplicate_policy: DuplicatePolicy::default(),
            builtin_agents: false,
        }
    }

    /// Apply references, discovery, and store settings from configuration.
    ///
    /// Subagent types are not part of configuration; register them separately.
    pub fn from_config(config: &DispatchConfig) -> Result<Self, ConfigError> {
        let mut builder = Self::new()
            .references(local::references_from_dirs(&config.agent_dirs)?)
            .references(config.remote_agents.iter().map(|url| {
                SubagentReference::new(url.clone(), crate::remote::RemoteAgentDefinition::KIND)
            }))
            .task_ttl(config.task_ttl())
            .duplicate_policy(config.duplicate_policy);
        if config.builtin_agents {
            builder = builder.with_builtin_agents();
        }
        Ok(builder)
    }

    /// Declare one subagent reference.
    pub fn reference(mut self, reference: SubagentReference) -> Self {
        self.references.push(reference);
        self
    }

    pub fn references(mut self, references: impl IntoIterator<Item = SubagentReference>) -> Self {
        self.references.extend(references);
        self
    }

    /// Register a resolver/executor pair. Resolvers are tried in registration order.
    pub fn subagent_type(mut self, subagent_type: SubagentType) -> Self {
        self.types.push(subagent_type);
        self
    }

    /// Replace the `task` tool description. Must contain `{agents}`.
    pub fn task_description_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Share an existing store instead of creating one.
    ///
    /// The shared store keeps its own TTL; [`task_ttl`](Self::task_ttl) is
    /// ignored when a store is given.
    pub fn store(mut self, store: Arc<BackgroundTaskStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// How long finished background tasks stay retrievable.
    pub fn task_ttl(mut self, ttl: Duration) -> Self {
        self.task_ttl = Some(ttl);
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Add the built-in agents when a `LOCAL` type is registered.
    pub fn with_builtin_agents(mut self) -> Self {
        self.builtin_agents = true;
        self
    }

    /// Resolve every reference and assemble the dispatcher.
    pub async fn build(self) -> Result<Dispatcher, ConfigError> {
        if self.types.is_empty() {
            return Err(ConfigError::NoSubagentTypes);
        }
        if !self.template.contains(AGENTS_PLACEHOLDER) {
            return Err(ConfigError::InvalidTemplate);
        }

        let mut executors = HashMap::new();
        for subagent_type in &self.types {
            let kind = subagent_type.kind().to_string();
            if executors
                .insert(kind.clone(), subagent_type.executor().clone())
                .is_some()
            {
                tracing::debug!(kind = %kind, "replacing executor for kind");
            }
        }

        let mut references = self.references;
        if self.builtin_agents {
            if executors.contains_key(LocalAgentDefinition::KIND) {
                references.extend(builtin::BUILTIN_AGENTS.iter().map(|name| {
                    SubagentReference::new(builtin::locator(name), LocalAgentDefinition::KIND)
                }));
            } else {
                tracing::warn!(
                    "built-in agents requested but no LOCAL subagent type is registered"
                );
            }
        }

        let mut names: Vec<String> = Vec::new();
        let mut definitions: HashMap<String, Arc<dyn SubagentDefinition>> = HashMap::new();

        for reference in &references {
            let resolver = self
                .types
                .iter()
                .map(SubagentType::resolver)
                .find(|resolver| resolver.can_resolve(reference))
                .ok_or_else(|| ConfigError::NoResolver {
                    reference: reference.to_string(),
                })?;

            let definition = resolver.resolve(reference).await?;
            if !executors.contains_key(definition.kind()) {
                return Err(ConfigError::NoExecutor {
                    kind: definition.kind().to_string(),
                });
            }

            let name = definition.name().to_string();
            if definitions.contains_key(&name) {
                match self.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        return Err(ConfigError::DuplicateName {
                            name,
                            locator: reference.locator().to_string(),
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        tracing::warn!(
                            subagent = %name,
                            locator = reference.locator(),
                            "duplicate subagent name, replacing earlier definition"
                        );
                    }
                }
            } else {
                names.push(name.clone());
            }
            definitions.insert(name, definition);
        }

        let catalog = names
            .iter()
            .filter_map(|name| definitions.get(name))
            .map(|definition| definition.catalog_entry())
            .collect::<Vec<_>>()
            .join("\n");
        let task_description = self.template.replace(AGENTS_PLACEHOLDER, &catalog);

        let store = match (self.store, self.task_ttl) {
            (Some(store), Some(ttl)) => {
                tracing::debug!(
                    requested = ?ttl,
                    kept = ?store.ttl(),
                    "task TTL ignored for a shared store"
                );
                store
            }
            (Some(store), None) => store,
            (None, Some(ttl)) => Arc::new(BackgroundTaskStore::with_ttl(ttl)),
            (None, None) => Arc::new(BackgroundTaskStore::new()),
        };

        tracing::info!(
            subagents = names.len(),
            kinds = executors.len(),
            "dispatcher ready"
        );

        Ok(Dispatcher {
            names,
            definitions,
            executors,
            store,
            catalog,
            task_description,
        })
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
