// ABOUTME: LocalAgentDefinition - a subagent defined by a document with a header and body.
// ABOUTME: The header names the agent and scopes its model, tools, and skills.

use std::any::Any;

use super::Document;
use crate::error::ResolveError;
use crate::subagent::{SubagentDefinition, SubagentReference};

const NAME_KEY: &str = "name";
const DESCRIPTION_KEY: &str = "description";
const MODEL_KEY: &str = "model";
const TOOLS_KEY: &str = "tools";
const DISALLOWED_TOOLS_KEY: &str = "disallowedTools";
const SKILLS_KEY: &str = "skills";
const PERMISSION_MODE_KEY: &str = "permissionMode";

/// Permission mode assumed when the header does not name one.
pub const DEFAULT_PERMISSION_MODE: &str = "default";

/// A locally hosted subagent, resolved from a document.
#[derive(Debug, Clone)]
pub struct LocalAgentDefinition {
    reference: SubagentReference,
    name: String,
    description: String,
    document: Document,
}

impl LocalAgentDefinition {
    /// Kind tag for local agents.
    pub const KIND: &'static str = "LOCAL";

    /// Build a definition from a parsed document.
    ///
    /// Fails when the header lacks a non-empty `name` or `description`.
    pub fn from_document(
        reference: SubagentReference,
        document: Document,
    ) -> Result<Self, ResolveError> {
        let name = required(&reference, &document, NAME_KEY)?;
        let description = required(&reference, &document, DESCRIPTION_KEY)?;
        Ok(Self {
            reference,
            name,
            description,
            document,
        })
    }

    /// The declared model, if any.
    pub fn model(&self) -> Option<&str> {
        self.document.get(MODEL_KEY).filter(|m| !m.is_empty())
    }

    /// Allow-list of capabilities. `None` keeps the full baseline.
    pub fn tools(&self) -> Option<Vec<String>> {
        self.document.list(TOOLS_KEY)
    }

    /// Deny-list of capabilities. `None` removes nothing.
    pub fn disallowed_tools(&self) -> Option<Vec<String>> {
        self.document.list(DISALLOWED_TOOLS_KEY)
    }

    /// Knowledge modules appended to the system prompt.
    pub fn skills(&self) -> Vec<String> {
        self.document.list(SKILLS_KEY).unwrap_or_default()
    }

    pub fn permission_mode(&self) -> &str {
        self.document
            .get(PERMISSION_MODE_KEY)
            .unwrap_or(DEFAULT_PERMISSION_MODE)
    }

    /// The document body, used as the system prompt.
    pub fn content(&self) -> &str {
        self.document.body()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn required(
    reference: &SubagentReference,
    document: &Document,
    field: &'static str,
) -> Result<String, ResolveError> {
    document
        .get(field)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ResolveError::MissingField {
            locator: reference.locator().to_string(),
            field,
        })
}

impl SubagentDefinition for LocalAgentDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
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

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(text: &str) -> Result<LocalAgentDefinition, ResolveError> {
        LocalAgentDefinition::from_document(
            SubagentReference::new("doc://agent.md", LocalAgentDefinition::KIND),
            Document::parse(text),
        )
    }

    #[test]
    fn test_full_header() {
        let def = definition(
            "---\nname: x\ndescription: y\nmodel: haiku\ntools: A, B\ndisallowedTools: B\nskills: rust, git\npermissionMode: acceptEdits\n---\nBody",
        )
        .unwrap();

        assert_eq!(def.name(), "x");
        assert_eq!(def.description(), "y");
        assert_eq!(def.kind(), "LOCAL");
        assert_eq!(def.model(), Some("haiku"));
        assert_eq!(def.tools(), Some(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(def.disallowed_tools(), Some(vec!["B".to_string()]));
        assert_eq!(def.skills(), vec!["rust", "git"]);
        assert_eq!(def.permission_mode(), "acceptEdits");
        assert_eq!(def.content(), "Body");
        assert_eq!(def.catalog_entry(), "- x: y");
    }

    #[test]
    fn test_defaults() {
        let def = definition("---\nname: x\ndescription: y\n---\nBody").unwrap();
        assert_eq!(def.model(), None);
        assert_eq!(def.tools(), None);
        assert_eq!(def.disallowed_tools(), None);
        assert!(def.skills().is_empty());
        assert_eq!(def.permission_mode(), DEFAULT_PERMISSION_MODE);
    }

    #[test]
    fn test_missing_name() {
        let err = definition("---\ndescription: y\n---\nBody").unwrap_err();
        assert!(matches!(err, ResolveError::MissingField { field: "name", .. }));
    }

    #[test]
    fn test_missing_description() {
        let err = definition("---\nname: x\ndescription:\n---\nBody").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingField {
                field: "description",
                ..
            }
        ));
    }

    #[test]
    fn test_no_header_is_missing_name() {
        assert!(definition("You are a researcher.").is_err());
    }
}
