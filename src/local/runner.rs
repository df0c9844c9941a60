// ABOUTME: SubAgent runner - executes the think-act loop for one local agent run.
// ABOUTME: Offers only the scoped tools, executes tool calls, and returns the final text.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::LlmError;
use crate::llm::{ContentBlock, LlmClient, Message, Request, Role, Usage};
use crate::tool::FilteredRegistry;

/// Default bound on think-act iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Default max tokens per model turn.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Result from running a subagent.
#[derive(Debug, Clone)]
pub struct SubAgentResult {
    /// Unique identifier for this agent run.
    pub agent_id: String,

    /// Final text content from the agent.
    pub content: String,

    /// Number of tool calls made during execution.
    pub tool_use_count: usize,

    /// Total token usage across all model calls.
    pub usage: Usage,

    /// Number of iterations in the think-act loop.
    pub iterations: usize,
}

/// One run of a local agent with a fresh conversation.
pub struct SubAgent {
    agent_id: String,
    system_prompt: String,
    model: String,
    client: Arc<dyn LlmClient>,
    tools: FilteredRegistry,
    max_iterations: usize,
    max_tokens: u32,
    messages: Vec<Message>,
    tool_use_count: usize,
    usage: Usage,
}

impl SubAgent {
    pub fn new(
        system_prompt: impl Into<String>,
        model: impl Into<String>,
        client: Arc<dyn LlmClient>,
        tools: FilteredRegistry,
    ) -> Self {
        Self {
            agent_id: Uuid::new_v4().to_string(),
            system_prompt: system_prompt.into(),
            model: model.into(),
            client,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: Vec::new(),
            tool_use_count: 0,
            usage: Usage::default(),
        }
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Run the agent on a prompt and return the result.
    pub async fn run(&mut self, prompt: &str) -> Result<SubAgentResult, LlmError> {
        self.messages.push(Message::user(prompt));

        let definitions = self.tools.to_definitions().await;
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(LlmError::MaxIterations(self.max_iterations));
            }

            let request = Request::new(&self.model)
                .system(&self.system_prompt)
                .messages(self.messages.clone())
                .tools(definitions.clone())
                .max_tokens(self.max_tokens);

            let response = self.client.create_message(&request).await?;

            self.usage.input_tokens += response.usage.input_tokens;
            self.usage.output_tokens += response.usage.output_tokens;

            if !response.has_tool_use() {
                return Ok(SubAgentResult {
                    agent_id: self.agent_id.clone(),
                    content: response.text(),
                    tool_use_count: self.tool_use_count,
                    usage: self.usage.clone(),
                    iterations,
                });
            }

            self.messages.push(Message {
                role: Role::Assistant,
                content: response.content.clone(),
            });

            let mut tool_results = Vec::new();
            for block in &response.content {
                if let ContentBlock::ToolUse { id, name, input } = block {
                    self.tool_use_count += 1;
                    tool_results.push(self.call_tool(id, name, input.clone()).await);
                }
            }
            self.messages.push(Message::tool_results(tool_results));
        }
    }

    async fn call_tool(&self, id: &str, name: &str, input: serde_json::Value) -> ContentBlock {
        let Some(tool) = self.tools.get(name).await else {
            tracing::debug!(agent_id = %self.agent_id, tool = name, "tool not in scope");
            return ContentBlock::tool_error(id, format!("Tool '{name}' not found or not allowed"));
        };

        match tool.execute(input).await {
            Ok(result) if result.is_error => ContentBlock::tool_error(id, result.content),
            Ok(result) => ContentBlock::tool_result(id, result.content),
            Err(e) => ContentBlock::tool_error(id, e.to_string()),
        }
    }
}
