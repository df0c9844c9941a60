// ABOUTME: TaskTool and TaskOutputTool - expose the dispatcher to an outer agent as tools.
// ABOUTME: Every failure the caller should read comes back as an error result, not Err.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Dispatcher, TaskOutcome, TaskOutputRequest};
use crate::error::ToolError;
use crate::subagent::TaskRequest;
use crate::tool::{Tool, ToolResult};

/// Name of the tool that runs a subagent.
pub const TASK_TOOL_NAME: &str = "task";

/// Name of the tool that reads background task output.
pub const TASK_OUTPUT_TOOL_NAME: &str = "task_output";

const TASK_OUTPUT_DESCRIPTION: &str = "\
Retrieves output from a running or completed background task.

- Takes a task_id parameter identifying the task
- Returns the task output along with status information
- Use block=true (default) to wait for task completion
- Use block=false for a non-blocking check of current status
- Task IDs are returned by the task tool when run_in_background is true
- Works with background subagents";

/// Runs a subagent for the calling agent.
///
/// The description lists every registered subagent, so the calling model
/// can pick one by name.
pub struct TaskTool {
    dispatcher: Arc<Dispatcher>,
}

impl TaskTool {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for TaskTool {
    fn name(&self) -> &str {
        TASK_TOOL_NAME
    }

    fn description(&self) -> &str {
        self.dispatcher.task_description()
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "A short (3-5 word) description of the task"
                },
                "prompt": {
                    "type": "string",
                    "description": "The task for the agent to perform"
                },
                "subagent_type": {
                    "type": "string",
                    "description": "The type of specialized agent to use for this task"
                },
                "model": {
                    "type": "string",
                    "description": "Optional model to use for this agent. Overrides the agent's own model."
                },
                "resume": {
                    "type": "string",
                    "description": "Optional agent ID to resume from"
                },
                "run_in_background": {
                    "type": "boolean",
                    "description": "Set to true to run this agent in the background. Use task_output to read the output later."
                }
            },
            "required": ["description", "prompt", "subagent_type"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let request: TaskRequest = match serde_json::from_value(params) {
            Ok(request) => request,
            Err(e) => {
                return Ok(ToolResult::error(
                    ToolError::InvalidParams(e.to_string()).to_string(),
                ));
            }
        };
        let subagent = request.subagent_type.clone();

        let outcome = self.dispatcher.run_task(request).await;
        let result = match &outcome {
            TaskOutcome::Failed(text) => ToolResult::error(text.as_str()),
            TaskOutcome::Background { task_id } => {
                ToolResult::text(outcome.to_string()).with_metadata("task_id", task_id)
            }
            TaskOutcome::Completed(_) => ToolResult::text(outcome.to_string()),
        };
        Ok(result.with_metadata("subagent_type", subagent))
    }
}

/// Reads the status and output of a background task.
pub struct TaskOutputTool {
    dispatcher: Arc<Dispatcher>,
}

impl TaskOutputTool {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for TaskOutputTool {
    fn name(&self) -> &str {
        TASK_OUTPUT_TOOL_NAME
    }

    fn description(&self) -> &str {
        TASK_OUTPUT_DESCRIPTION
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "task_id": {
                    "type": "string",
                    "description": "The task ID to get output from"
                },
                "block": {
                    "type": "boolean",
                    "description": "Whether to wait for completion (default: true)"
                },
                "timeout": {
                    "type": "integer",
                    "description": "Max wait time in ms (default: 30000, max: 600000)"
                }
            },
            "required": ["task_id"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let request: TaskOutputRequest = match serde_json::from_value(params) {
            Ok(request) => request,
            Err(e) => {
                return Ok(ToolResult::error(
                    ToolError::InvalidParams(e.to_string()).to_string(),
                ));
            }
        };

        let report = self.dispatcher.task_output(&request).await;
        let result = if report.is_error() {
            ToolResult::error(report.to_string())
        } else {
            ToolResult::text(report.to_string())
        };
        Ok(match report.status() {
            Some(status) => result.with_metadata("status", status.to_string()),
            None => result,
        })
    }
}

impl Dispatcher {
    /// The `task` tool backed by this dispatcher.
    pub fn task_tool(self: &Arc<Self>) -> TaskTool {
        TaskTool::new(Arc::clone(self))
    }

    /// The `task_output` tool backed by this dispatcher.
    pub fn output_tool(self: &Arc<Self>) -> TaskOutputTool {
        TaskOutputTool::new(Arc::clone(self))
    }
}
