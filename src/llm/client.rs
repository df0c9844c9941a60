// ABOUTME: Defines the LlmClient trait - the abstraction layer that lets
// ABOUTME: relay run local subagents against any model provider.

use async_trait::async_trait;

use super::{Request, Response};
use crate::error::LlmError;

/// Trait for LLM client implementations.
///
/// relay never talks to a model provider directly. The dispatcher's owner
/// registers one client per provider with the [`ModelRouter`](super::ModelRouter).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Create a message (non-streaming).
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError>;
}
