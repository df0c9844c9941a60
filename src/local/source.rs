// ABOUTME: DocumentSource - where local agent documents are loaded from.
// ABOUTME: FileSystemSource reads from disk; InMemorySource serves a fixed map.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::ResolveError;

/// Loads the raw text of a document by locator.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load(&self, locator: &str) -> Result<String, ResolveError>;
}

/// Reads documents from the filesystem. A leading `file:` is stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemSource;

#[async_trait]
impl DocumentSource for FileSystemSource {
    async fn load(&self, locator: &str) -> Result<String, ResolveError> {
        let path = locator.strip_prefix("file:").unwrap_or(locator);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ResolveError::Io {
                locator: locator.to_string(),
                source,
            })
    }
}

/// Serves documents from memory, keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document under `locator`.
    pub fn with_document(mut self, locator: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(locator.into(), text.into());
        self
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn load(&self, locator: &str) -> Result<String, ResolveError> {
        self.documents
            .get(locator)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownDocument(locator.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_filesystem_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.md");
        std::fs::write(&path, "hello").unwrap();

        let plain = FileSystemSource.load(path.to_str().unwrap()).await.unwrap();
        assert_eq!(plain, "hello");

        let prefixed = FileSystemSource
            .load(&format!("file:{}", path.display()))
            .await
            .unwrap();
        assert_eq!(prefixed, "hello");
    }

    #[tokio::test]
    async fn test_filesystem_source_missing_file() {
        let err = FileSystemSource.load("/nonexistent/agent.md").await.unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/agent.md"));
    }

    #[tokio::test]
    async fn test_in_memory_source() {
        let source = InMemorySource::new().with_document("doc://a.md", "text");
        assert_eq!(source.load("doc://a.md").await.unwrap(), "text");
        assert!(matches!(
            source.load("doc://b.md").await,
            Err(ResolveError::UnknownDocument(_))
        ));
    }
}
