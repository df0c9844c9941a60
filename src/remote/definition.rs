// ABOUTME: RemoteAgentDefinition - a subagent reached over the A2A protocol.
// ABOUTME: Wraps the agent card fetched at resolution time.

use std::any::Any;

use super::AgentCard;
use crate::subagent::{SubagentDefinition, SubagentReference};

/// A remote subagent described by its agent card.
#[derive(Debug, Clone)]
pub struct RemoteAgentDefinition {
    reference: SubagentReference,
    card: AgentCard,
}

impl RemoteAgentDefinition {
    /// Kind tag for remote agents.
    pub const KIND: &'static str = "A2A";

    pub fn new(reference: SubagentReference, card: AgentCard) -> Self {
        Self { reference, card }
    }

    pub fn card(&self) -> &AgentCard {
        &self.card
    }

    /// Where to send messages: the card's url, else the reference locator.
    pub fn endpoint(&self) -> &str {
        if self.card.url.is_empty() {
            self.reference.locator()
        } else {
            &self.card.url
        }
    }
}

impl SubagentDefinition for RemoteAgentDefinition {
    fn name(&self) -> &str {
        &self.card.name
    }

    fn description(&self) -> &str {
        &self.card.description
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn reference(&self) -> &SubagentReference {
        &self.reference
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
