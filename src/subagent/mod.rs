// ABOUTME: Subagent core - references, definitions, and the resolver/executor seam.
// ABOUTME: A SubagentType pairs one resolver with one executor for a kind.

mod definition;
mod reference;
mod request;
mod resolver;

pub use definition::SubagentDefinition;
pub use reference::SubagentReference;
pub use request::TaskRequest;
pub use resolver::{SubagentExecutor, SubagentResolver, SubagentType};
