// ABOUTME: AgentCard - the self-description a remote agent publishes for discovery.
// ABOUTME: Only the fields the dispatcher reads are modeled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Where remote agents publish their card, relative to their base URL.
pub const WELL_KNOWN_AGENT_CARD_PATH: &str = "/.well-known/agent-card.json";

/// A remote agent's published card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,

    /// Endpoint for JSON-RPC calls. Empty when the card does not say.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<String>,

    #[serde(default)]
    pub default_input_modes: Vec<String>,

    #[serde(default)]
    pub default_output_modes: Vec<String>,

    #[serde(default)]
    pub capabilities: AgentCapabilities,

    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

/// Optional protocol features a remote agent supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,
}

/// A skill advertised on an agent card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
