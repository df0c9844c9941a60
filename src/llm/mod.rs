// ABOUTME: LLM module - the model-invocation seam local subagents run against.
// ABOUTME: Defines message types, the LlmClient trait, and provider:model routing.

mod client;
mod router;
mod types;

pub use client::*;
pub use router::*;
pub use types::*;

#[cfg(test)]
mod types_test;
