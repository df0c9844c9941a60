// ABOUTME: TaskRequest - the parameters of one "run task" call from the outer agent.
// ABOUTME: Deserialized straight from the task tool's JSON input.

use serde::{Deserialize, Serialize};

/// A request to run one subagent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// A short (3-5 word) label for the task.
    #[serde(default)]
    pub description: String,

    /// The instruction handed to the subagent as its user input.
    pub prompt: String,

    /// Name of the subagent to run.
    pub subagent_type: String,

    /// Optional model override, `provider:model` or an alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Accepted for forward compatibility; resuming is not implemented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,

    /// Run the subagent in the background and return a task id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_in_background: Option<bool>,
}

impl TaskRequest {
    pub fn new(subagent_type: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            description: String::new(),
            prompt: prompt.into(),
            subagent_type: subagent_type.into(),
            model: None,
            resume: None,
            run_in_background: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn resume(mut self, agent_id: impl Into<String>) -> Self {
        self.resume = Some(agent_id.into());
        self
    }

    pub fn background(mut self, background: bool) -> Self {
        self.run_in_background = Some(background);
        self
    }

    /// Whether the caller asked for background execution.
    pub fn is_background(&self) -> bool {
        self.run_in_background.unwrap_or(false)
    }
}
