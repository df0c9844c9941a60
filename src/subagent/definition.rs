// ABOUTME: SubagentDefinition - the resolved, immutable description of one subagent.
// ABOUTME: Kind-specific definitions implement this and are downcast by their executor.

use std::any::Any;
use std::fmt::Debug;

use super::SubagentReference;

/// Identity and metadata shared by every kind of subagent.
pub trait SubagentDefinition: Debug + Send + Sync {
    /// Unique name of this subagent within one dispatcher.
    fn name(&self) -> &str;

    /// What this subagent is for; shown to the calling agent.
    fn description(&self) -> &str;

    /// The kind tag, e.g. `"LOCAL"` or `"A2A"`.
    fn kind(&self) -> &str;

    /// The reference this definition was resolved from.
    fn reference(&self) -> &SubagentReference;

    /// Access to the concrete type, for the executor of this kind.
    fn as_any(&self) -> &dyn Any;

    /// One catalog line for the `task` tool description.
    fn catalog_entry(&self) -> String {
        format!("- {}: {}", self.name(), self.description())
    }
}
