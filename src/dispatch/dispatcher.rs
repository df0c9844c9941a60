// ABOUTME: Dispatcher - routes task requests to subagents by name and runs them.
// ABOUTME: Runs inline or in the background, and answers output queries from the store.

use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use uuid::Uuid;

use super::store::panic_message;
use super::{BackgroundTaskStore, DispatcherBuilder, TaskOutputRequest, TaskReport, WaitOutcome};
use crate::error::ExecutionError;
use crate::subagent::{SubagentDefinition, SubagentExecutor, TaskRequest};

/// The outcome of one "run task" call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The subagent ran inline and produced this text.
    Completed(String),
    /// The subagent was scheduled in the background.
    Background { task_id: String },
    /// Lookup or execution failed; the text explains why.
    Failed(String),
}

impl TaskOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(text) | Self::Failed(text) => f.write_str(text),
            Self::Background { task_id } => write!(
                f,
                "task_id: {task_id}\n\nBackground task started with ID: {task_id}\n\
                 Use task_output tool with task_id='{task_id}' to retrieve results."
            ),
        }
    }
}

/// Registry of resolved subagents and the executors that run them.
///
/// Built once by [`DispatcherBuilder`]; the registries never change afterwards.
pub struct Dispatcher {
    pub(super) names: Vec<String>,
    pub(super) definitions: HashMap<String, Arc<dyn SubagentDefinition>>,
    pub(super) executors: HashMap<String, Arc<dyn SubagentExecutor>>,
    pub(super) store: Arc<BackgroundTaskStore>,
    pub(super) catalog: String,
    pub(super) task_description: String,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Subagent names, in catalog order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn definition(&self, name: &str) -> Option<&Arc<dyn SubagentDefinition>> {
        self.definitions.get(name)
    }

    /// One `- name: description` line per subagent.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Description of the `task` tool with the catalog filled in.
    pub fn task_description(&self) -> &str {
        &self.task_description
    }

    pub fn store(&self) -> &Arc<BackgroundTaskStore> {
        &self.store
    }

    /// Run a subagent for `request`.
    pub async fn run_task(&self, request: TaskRequest) -> TaskOutcome {
        let name = request.subagent_type.as_str();
        let Some(definition) = self.definitions.get(name).cloned() else {
            tracing::debug!(subagent = name, "no subagent found");
            return TaskOutcome::Failed(format!(
                "No subagent found with name: {}. Available subagents: {}",
                name,
                self.names.join(", ")
            ));
        };
        let Some(executor) = self.executors.get(definition.kind()).cloned() else {
            return TaskOutcome::Failed(format!(
                "No subagent executor found for subagent kind: {}",
                definition.kind()
            ));
        };

        if request.resume.is_some() {
            tracing::warn!(
                subagent = name,
                resume = request.resume.as_deref(),
                "resume is not supported yet, starting a fresh run"
            );
        }

        if request.is_background() {
            let task_id = format!("task_{}", Uuid::new_v4());
            tracing::info!(
                subagent = name,
                task_id = %task_id,
                description = %request.description,
                "dispatching background task"
            );
            let subagent = definition.name().to_string();
            self.store
                .create_with(
                    task_id.clone(),
                    async move { executor.execute(&request, definition.as_ref()).await },
                    move |error| {
                        let text = failure_text(&subagent, error);
                        let cause = failure_cause(&text, error);
                        (text, cause)
                    },
                )
                .await;
            return TaskOutcome::Background { task_id };
        }

        tracing::debug!(subagent = name, description = %request.description, "dispatching task");
        let run = AssertUnwindSafe(executor.execute(&request, definition.as_ref()))
            .catch_unwind()
            .await;
        match run {
            Ok(Ok(text)) => TaskOutcome::Completed(text),
            Ok(Err(e)) => TaskOutcome::Failed(failure_text(definition.name(), &e)),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(subagent = definition.name(), panic = %message, "subagent panicked");
                TaskOutcome::Failed(failure_text(
                    definition.name(),
                    &ExecutionError::Panicked(message),
                ))
            }
        }
    }

    /// Report on a background task, waiting first if the query asks to.
    pub async fn task_output(&self, request: &TaskOutputRequest) -> TaskReport {
        let Some(task) = self.store.get(&request.task_id).await else {
            return TaskReport::NotFound {
                task_id: request.task_id.clone(),
            };
        };

        if request.should_block() && !task.is_completed() {
            let outcome = task.wait_for_completion(request.wait_timeout()).await;
            if outcome == WaitOutcome::Interrupted {
                return TaskReport::Interrupted {
                    task_id: request.task_id.clone(),
                };
            }
        }

        TaskReport::snapshot(&task)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("names", &self.names)
            .field("kinds", &self.executors.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn failure_text(name: &str, error: &ExecutionError) -> String {
    match error {
        ExecutionError::Remote(e) => format!("Error communicating with agent '{name}': {e}"),
        other => format!("Error running subagent '{name}': {other}"),
    }
}

/// The first error in the source chain that `text` does not already show.
fn failure_cause(text: &str, error: &ExecutionError) -> Option<String> {
    let mut source = std::error::Error::source(error);
    while let Some(e) = source {
        let message = e.to_string();
        if !text.contains(&message) {
            return Some(message);
        }
        source = std::error::Error::source(e);
    }
    None
}
