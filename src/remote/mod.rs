// ABOUTME: Remote agents - subagents reached over the A2A protocol.
// ABOUTME: Card discovery, JSON-RPC transport, and the remote executor.

mod card;
mod definition;
mod executor;
pub mod protocol;
mod resolver;
mod transport;

pub use card::{AgentCapabilities, AgentCard, AgentSkill, WELL_KNOWN_AGENT_CARD_PATH};
pub use definition::RemoteAgentDefinition;
pub use executor::{DEFAULT_REMOTE_TIMEOUT, RemoteAgentExecutor};
pub use resolver::{DEFAULT_CARD_FETCH_TIMEOUT, RemoteAgentResolver};
pub use transport::{A2aTransport, JsonRpcTransport};

use std::sync::Arc;

use crate::subagent::SubagentType;

/// An `A2A` subagent type with the default card path, transport, and timeout.
pub fn subagent_type() -> SubagentType {
    SubagentType::new(
        Arc::new(RemoteAgentResolver::new()),
        Arc::new(RemoteAgentExecutor::new()),
    )
}
