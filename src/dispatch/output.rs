// ABOUTME: Output retrieval for background tasks - the query and the status report.
// ABOUTME: The report's Display form is the exact text handed back to the calling agent.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{BackgroundTask, TaskStatus};

/// Wait used when a blocking query names no timeout.
pub const DEFAULT_OUTPUT_TIMEOUT_MS: u64 = 30_000;

/// Upper bound on any blocking wait.
pub const MAX_OUTPUT_TIMEOUT_MS: u64 = 600_000;

/// A query for a background task's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutputRequest {
    pub task_id: String,

    /// Wait for completion. Defaults to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<bool>,

    /// Max wait in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl TaskOutputRequest {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            block: None,
            timeout: None,
        }
    }

    pub fn block(mut self, block: bool) -> Self {
        self.block = Some(block);
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn should_block(&self) -> bool {
        self.block.unwrap_or(true)
    }

    /// The wait bound, defaulted and clamped.
    pub fn wait_timeout(&self) -> Duration {
        let ms = self
            .timeout
            .map_or(DEFAULT_OUTPUT_TIMEOUT_MS, |t| t.min(MAX_OUTPUT_TIMEOUT_MS));
        Duration::from_millis(ms)
    }
}

/// What an output query found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskReport {
    NotFound {
        task_id: String,
    },
    Interrupted {
        task_id: String,
    },
    Running {
        task_id: String,
    },
    Completed {
        task_id: String,
        result: String,
    },
    Failed {
        task_id: String,
        error: String,
        cause: Option<String>,
    },
}

impl TaskReport {
    /// Report the task's current state.
    pub fn snapshot(task: &BackgroundTask) -> Self {
        let task_id = task.id().to_string();
        match task.status() {
            TaskStatus::Running => Self::Running { task_id },
            TaskStatus::Completed => Self::Completed {
                task_id,
                result: task.result().unwrap_or_default(),
            },
            TaskStatus::Failed => Self::Failed {
                task_id,
                error: task.error().unwrap_or_default(),
                cause: task.cause(),
            },
        }
    }

    /// The task's status, when the task was found and observed.
    pub fn status(&self) -> Option<TaskStatus> {
        match self {
            Self::NotFound { .. } | Self::Interrupted { .. } => None,
            Self::Running { .. } => Some(TaskStatus::Running),
            Self::Completed { .. } => Some(TaskStatus::Completed),
            Self::Failed { .. } => Some(TaskStatus::Failed),
        }
    }

    /// Whether the report should be flagged as an error to the caller.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Interrupted { .. } | Self::Failed { .. }
        )
    }
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { task_id } => {
                write!(f, "Error: No background task found with ID: {task_id}")
            }
            Self::Interrupted { .. } => write!(f, "Error: Wait for task interrupted"),
            Self::Running { task_id } => {
                write!(f, "Task ID: {task_id}\nStatus: running\n\nTask still running...")
            }
            Self::Completed { task_id, result } => {
                write!(f, "Task ID: {task_id}\nStatus: completed\n\nResult:\n{result}")
            }
            Self::Failed {
                task_id,
                error,
                cause,
            } => {
                write!(f, "Task ID: {task_id}\nStatus: failed\n\nError:\n{error}")?;
                if let Some(cause) = cause {
                    write!(f, "\nCause: {cause}")?;
                }
                Ok(())
            }
        }
    }
}
