// ABOUTME: SubagentReference - an immutable pointer to where a subagent's definition lives.
// ABOUTME: Carries a locator, a kind tag selecting the resolver, and optional metadata.

use std::collections::HashMap;
use std::fmt;

/// Pointer to a subagent definition, declared at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubagentReference {
    locator: String,
    kind: String,
    metadata: Option<HashMap<String, String>>,
}

impl SubagentReference {
    /// Create a reference with no metadata.
    pub fn new(locator: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            kind: kind.into(),
            metadata: None,
        }
    }

    /// Attach metadata to the reference.
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Where the definition lives: a path, a URL, or a `builtin:` name.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// The kind tag used to pick a resolver and executor.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn metadata(&self) -> Option<&HashMap<String, String>> {
        self.metadata.as_ref()
    }
}

impl fmt::Display for SubagentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.locator, self.kind)
    }
}
