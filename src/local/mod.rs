// ABOUTME: Local agents - subagents defined by documents and run in-process.
// ABOUTME: Covers parsing, resolution, discovery, skills, and the think-act executor.

pub mod builtin;
mod definition;
mod document;
mod executor;
mod references;
mod resolver;
mod runner;
mod skills;
mod source;

pub use definition::{DEFAULT_PERMISSION_MODE, LocalAgentDefinition};
pub use document::{Document, split_list};
pub use executor::LocalAgentExecutor;
pub use references::{references_from_dir, references_from_dirs};
pub use resolver::LocalAgentResolver;
pub use runner::{DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS, SubAgent, SubAgentResult};
pub use skills::{Skill, SkillLibrary};
pub use source::{DocumentSource, FileSystemSource, InMemorySource};

use std::sync::Arc;

use crate::llm::ModelRouter;
use crate::subagent::SubagentType;
use crate::tool::Registry;

/// A `LOCAL` subagent type reading documents from disk.
pub fn subagent_type(tools: Registry, router: ModelRouter) -> SubagentType {
    SubagentType::new(
        Arc::new(LocalAgentResolver::default()),
        Arc::new(LocalAgentExecutor::new(tools, router)),
    )
}
