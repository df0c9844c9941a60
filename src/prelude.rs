// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use relay::prelude::*;` to get started quickly.

pub use crate::config::DispatchConfig;
pub use crate::dispatch::{
    BackgroundTaskStore, Dispatcher, DispatcherBuilder, DuplicatePolicy, TaskOutcome,
    TaskOutputRequest, TaskOutputTool, TaskReport, TaskStatus, TaskTool,
};
pub use crate::error::{
    ConfigError, ExecutionError, LlmError, RelayError, RemoteError, ResolveError, ToolError,
};
pub use crate::llm::{
    ContentBlock, LlmClient, Message, ModelRouter, Provider, Request, Response, Role, StopReason,
    ToolDefinition, Usage,
};
pub use crate::local::{LocalAgentDefinition, LocalAgentExecutor, LocalAgentResolver, SkillLibrary};
pub use crate::remote::{RemoteAgentDefinition, RemoteAgentExecutor, RemoteAgentResolver};
pub use crate::subagent::{
    SubagentDefinition, SubagentExecutor, SubagentReference, SubagentResolver, SubagentType,
    TaskRequest,
};
pub use crate::tool::{FilteredRegistry, Registry, Tool, ToolResult};
