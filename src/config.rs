// ABOUTME: DispatchConfig - discovery directories, remote agents, and store settings.
// ABOUTME: Loadable from RELAY_* environment variables or any serde source.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::dispatch::{DEFAULT_TASK_TTL, DuplicatePolicy};
use crate::error::ConfigError;
use crate::local::SkillLibrary;
use crate::remote::{
    DEFAULT_REMOTE_TIMEOUT, JsonRpcTransport, RemoteAgentExecutor, RemoteAgentResolver,
    WELL_KNOWN_AGENT_CARD_PATH,
};
use crate::subagent::SubagentType;

/// Dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Directories scanned recursively for `*.md` agent documents.
    pub agent_dirs: Vec<PathBuf>,
    /// Directories scanned recursively for `SKILL.md` files.
    pub skill_dirs: Vec<PathBuf>,
    /// Base URLs of A2A agents.
    pub remote_agents: Vec<String>,
    pub agent_card_path: String,
    pub remote_timeout_secs: u64,
    pub task_ttl_secs: u64,
    pub builtin_agents: bool,
    #[serde(deserialize_with = "deserialize_policy")]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            agent_dirs: Vec::new(),
            skill_dirs: Vec::new(),
            remote_agents: Vec::new(),
            agent_card_path: WELL_KNOWN_AGENT_CARD_PATH.to_string(),
            remote_timeout_secs: DEFAULT_REMOTE_TIMEOUT.as_secs(),
            task_ttl_secs: DEFAULT_TASK_TTL.as_secs(),
            builtin_agents: false,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl DispatchConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - RELAY_AGENT_DIRS: colon-separated agent document directories
    /// - RELAY_SKILL_DIRS: colon-separated skill directories
    /// - RELAY_REMOTE_AGENTS: comma-separated A2A base URLs
    /// - RELAY_AGENT_CARD_PATH: agent card path (default: /.well-known/agent-card.json)
    /// - RELAY_REMOTE_TIMEOUT_SECS: remote call timeout (default: 60)
    /// - RELAY_TASK_TTL_SECS: background task retention (default: 3600)
    /// - RELAY_BUILTIN_AGENTS: register the built-in agents (default: false)
    /// - RELAY_DUPLICATE_POLICY: `reject` or `last-wins` (default: reject)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let agent_dirs = var("RELAY_AGENT_DIRS").map(|v| paths(&v)).unwrap_or_default();
        let skill_dirs = var("RELAY_SKILL_DIRS").map(|v| paths(&v)).unwrap_or_default();

        let remote_agents = var("RELAY_REMOTE_AGENTS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let agent_card_path = var("RELAY_AGENT_CARD_PATH").unwrap_or(defaults.agent_card_path);

        let remote_timeout_secs = match var("RELAY_REMOTE_TIMEOUT_SECS") {
            Some(v) => parse("RELAY_REMOTE_TIMEOUT_SECS", v)?,
            None => defaults.remote_timeout_secs,
        };
        let task_ttl_secs = match var("RELAY_TASK_TTL_SECS") {
            Some(v) => parse("RELAY_TASK_TTL_SECS", v)?,
            None => defaults.task_ttl_secs,
        };

        let builtin_agents = match var("RELAY_BUILTIN_AGENTS") {
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(invalid("RELAY_BUILTIN_AGENTS", v)),
            },
            None => defaults.builtin_agents,
        };

        let duplicate_policy = match var("RELAY_DUPLICATE_POLICY") {
            Some(v) => parse("RELAY_DUPLICATE_POLICY", v)?,
            None => defaults.duplicate_policy,
        };

        Ok(Self {
            agent_dirs,
            skill_dirs,
            remote_agents,
            agent_card_path,
            remote_timeout_secs,
            task_ttl_secs,
            builtin_agents,
            duplicate_policy,
        })
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    pub fn task_ttl(&self) -> Duration {
        Duration::from_secs(self.task_ttl_secs)
    }

    /// An `A2A` subagent type using the configured card path and timeout.
    pub fn remote_subagent_type(&self) -> SubagentType {
        SubagentType::new(
            Arc::new(RemoteAgentResolver::new().card_path(self.agent_card_path.as_str())),
            Arc::new(
                RemoteAgentExecutor::with_transport(Arc::new(JsonRpcTransport::with_timeout(
                    self.remote_timeout(),
                )))
                .timeout(self.remote_timeout()),
            ),
        )
    }

    /// Load every skill under the configured skill directories.
    pub async fn load_skills(&self) -> Result<SkillLibrary, ConfigError> {
        SkillLibrary::load_dirs(&self.skill_dirs).await
    }
}

fn paths(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse<T: FromStr>(var: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(var, value))
}

fn invalid(var: &str, value: String) -> ConfigError {
    ConfigError::InvalidEnv {
        var: var.to_string(),
        value,
    }
}

fn deserialize_policy<'de, D>(deserializer: D) -> Result<DuplicatePolicy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value
        .parse()
        .map_err(|v| serde::de::Error::custom(format!("unknown duplicate policy: {v}")))
}
