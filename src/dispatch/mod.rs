// ABOUTME: Dispatch - the subagent registry, task routing, and background task store.
// ABOUTME: Exposes the dispatcher to an outer agent through the task and task_output tools.

mod builder;
mod dispatcher;
mod output;
mod store;
mod tools;

pub use builder::{AGENTS_PLACEHOLDER, DEFAULT_TASK_DESCRIPTION, DispatcherBuilder, DuplicatePolicy};
pub use dispatcher::{Dispatcher, TaskOutcome};
pub use output::{DEFAULT_OUTPUT_TIMEOUT_MS, MAX_OUTPUT_TIMEOUT_MS, TaskOutputRequest, TaskReport};
pub use store::{
    BackgroundTask, BackgroundTaskStore, DEFAULT_TASK_TTL, TaskStatus, WaitOutcome,
};
pub use tools::{TASK_OUTPUT_TOOL_NAME, TASK_TOOL_NAME, TaskOutputTool, TaskTool};
