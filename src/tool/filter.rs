// ABOUTME: FilteredRegistry - a scoped view of the baseline Registry for one subagent.
// ABOUTME: Narrows to an allow-list, then removes a deny-list; absent lists are no-ops.

use std::sync::Arc;

use crate::llm::ToolDefinition;
use crate::tool::{Registry, Tool};

/// A filtered view of a Registry that restricts tool access.
///
/// The allow-list is applied first, then the deny-list is removed from
/// whatever remains. `None` for either list leaves the set untouched; it
/// never means "no tools".
pub struct FilteredRegistry {
    source: Registry,
    allowed_tools: Option<Vec<String>>,
    denied_tools: Option<Vec<String>>,
}

impl FilteredRegistry {
    /// Create a new filtered registry from a source registry.
    pub fn new(source: Registry) -> Self {
        Self {
            source,
            allowed_tools: None,
            denied_tools: None,
        }
    }

    /// Set the allow-list of tools. If None, all tools are allowed.
    pub fn allowed(mut self, tools: Option<Vec<String>>) -> Self {
        self.allowed_tools = tools;
        self
    }

    /// Set the deny-list of tools. If None, nothing is removed.
    pub fn denied(mut self, tools: Option<Vec<String>>) -> Self {
        self.denied_tools = tools;
        self
    }

    /// Check if a tool name passes the filter.
    pub fn is_allowed(&self, name: &str) -> bool {
        let in_allowed = match &self.allowed_tools {
            None => true,
            Some(allowed) => allowed.iter().any(|a| a == name),
        };
        let in_denied = match &self.denied_tools {
            None => false,
            Some(denied) => denied.iter().any(|d| d == name),
        };
        in_allowed && !in_denied
    }

    /// Get a tool by name if it passes the filter.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        if !self.is_allowed(name) {
            return None;
        }
        self.source.get(name).await
    }

    /// List all tool names that pass the filter, sorted.
    pub async fn list(&self) -> Vec<String> {
        self.source
            .list()
            .await
            .into_iter()
            .filter(|name| self.is_allowed(name))
            .collect()
    }

    /// Convert filtered tools to model tool definitions.
    pub async fn to_definitions(&self) -> Vec<ToolDefinition> {
        self.source
            .all()
            .await
            .into_iter()
            .filter(|t| self.is_allowed(t.name()))
            .map(|t| t.definition())
            .collect()
    }
}

impl Clone for FilteredRegistry {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            allowed_tools: self.allowed_tools.clone(),
            denied_tools: self.denied_tools.clone(),
        }
    }
}
