// ABOUTME: SkillLibrary - knowledge modules that local agents append to their prompt.
// ABOUTME: Loaded from SKILL.md documents; keyed by header name or parent directory.

use std::collections::HashMap;
use std::path::Path;

use super::Document;
use super::references::find_files;
use crate::error::{ConfigError, ResolveError};

const SKILL_FILE: &str = "SKILL.md";

/// One knowledge module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub description: Option<String>,
    pub content: String,
}

impl Skill {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            content: content.into(),
        }
    }
}

/// Knowledge modules shared by all local agents of a dispatcher.
#[derive(Debug, Clone, Default)]
pub struct SkillLibrary {
    skills: HashMap<String, Skill>,
}

impl SkillLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `SKILL.md` found under each directory.
    pub async fn load_dirs<P: AsRef<Path>>(dirs: &[P]) -> Result<Self, ConfigError> {
        let mut library = Self::new();
        for dir in dirs {
            for path in find_files(dir.as_ref(), SKILL_FILE)? {
                let text = tokio::fs::read_to_string(&path).await.map_err(|source| {
                    ResolveError::Io {
                        locator: path.display().to_string(),
                        source,
                    }
                })?;
                let skill = parse_skill(&path, &text);
                tracing::debug!(skill = %skill.name, path = %path.display(), "loaded skill");
                library.insert(skill);
            }
        }
        Ok(library)
    }

    /// Add a skill, replacing any with the same name.
    pub fn insert(&mut self, skill: Skill) {
        self.skills.insert(skill.name.clone(), skill);
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.insert(skill);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    /// Skill names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.skills.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

fn parse_skill(path: &Path, text: &str) -> Skill {
    let document = Document::parse(text);
    let name = document
        .get("name")
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| {
            path.parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| SKILL_FILE.to_string());

    Skill {
        name,
        description: document.get("description").map(str::to_string),
        content: document.body().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let named = dir.path().join("pdf-tools");
        let unnamed = dir.path().join("nested").join("git-flow");
        std::fs::create_dir_all(&named).unwrap();
        std::fs::create_dir_all(&unnamed).unwrap();
        std::fs::write(
            named.join("SKILL.md"),
            "---\nname: pdf\ndescription: Working with PDFs\n---\nUse pdftotext.",
        )
        .unwrap();
        std::fs::write(unnamed.join("SKILL.md"), "Rebase before merging.").unwrap();
        std::fs::write(dir.path().join("README.md"), "not a skill").unwrap();

        let library = SkillLibrary::load_dirs(&[dir.path()]).await.unwrap();
        assert_eq!(library.names(), vec!["git-flow", "pdf"]);

        let pdf = library.get("pdf").unwrap();
        assert_eq!(pdf.content, "Use pdftotext.");
        assert_eq!(pdf.description.as_deref(), Some("Working with PDFs"));
        assert_eq!(library.get("git-flow").unwrap().content, "Rebase before merging.");
    }

    #[tokio::test]
    async fn test_load_missing_dir() {
        let result = SkillLibrary::load_dirs(&["/nonexistent/skills"]).await;
        assert!(matches!(result, Err(ConfigError::Discovery { .. })));
    }

    #[test]
    fn test_insert_and_lookup() {
        let library = SkillLibrary::new().with_skill(Skill::new("rust", "Prefer iterators."));
        assert_eq!(library.len(), 1);
        assert!(!library.is_empty());
        assert_eq!(library.get("rust").unwrap().content, "Prefer iterators.");
        assert!(library.get("go").is_none());
    }
}
