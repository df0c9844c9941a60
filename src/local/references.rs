// ABOUTME: Discovery of local agent documents on disk.
// ABOUTME: Walks a directory tree with glob and yields LOCAL references.

use std::path::{Path, PathBuf};

use super::LocalAgentDefinition;
use crate::error::ConfigError;
use crate::subagent::SubagentReference;

/// Every `*.md` file under `root`, as `LOCAL` references, in path order.
pub fn references_from_dir(root: impl AsRef<Path>) -> Result<Vec<SubagentReference>, ConfigError> {
    let files = find_files(root.as_ref(), "*.md")?;
    Ok(files
        .into_iter()
        .map(|path| {
            SubagentReference::new(path.display().to_string(), LocalAgentDefinition::KIND)
        })
        .collect())
}

/// References from several roots, in root order.
pub fn references_from_dirs<P: AsRef<Path>>(
    roots: &[P],
) -> Result<Vec<SubagentReference>, ConfigError> {
    let mut references = Vec::new();
    for root in roots {
        references.extend(references_from_dir(root)?);
    }
    Ok(references)
}

/// Regular files under `root` (recursively) whose name matches `file_pattern`.
pub(crate) fn find_files(root: &Path, file_pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let discovery = |message: String| ConfigError::Discovery {
        path: root.display().to_string(),
        message,
    };

    if !root.exists() {
        return Err(discovery("directory does not exist".to_string()));
    }
    if !root.is_dir() {
        return Err(discovery("path is not a directory".to_string()));
    }

    let pattern = root.join("**").join(file_pattern);
    let entries =
        glob::glob(&pattern.to_string_lossy()).map_err(|e| discovery(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| discovery(e.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("a.md"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let refs = references_from_dir(dir.path()).unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.kind() == "LOCAL"));
        assert!(refs.iter().any(|r| r.locator().ends_with("b.md")));
        assert!(refs.iter().any(|r| r.locator().ends_with("a.md")));
    }

    #[test]
    fn test_missing_root() {
        let err = references_from_dir("/nonexistent/agents").unwrap_err();
        assert!(matches!(err, ConfigError::Discovery { .. }));
    }

    #[test]
    fn test_root_is_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(references_from_dir(file.path()).is_err());
    }

    #[test]
    fn test_references_from_dirs() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("a.md"), "").unwrap();
        std::fs::write(second.path().join("b.md"), "").unwrap();

        let refs = references_from_dirs(&[first.path(), second.path()]).unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs[0].locator().ends_with("a.md"));
        assert!(refs[1].locator().ends_with("b.md"));
    }
}
