//! Agent catalog: the manifest plus per-agent source assets.
//!
//! Agent bundles ship embedded in the binary (the `src/agents/` tree). A
//! directory with the same layout can stand in for the embedded catalog,
//! which is how development checkouts and tests provide their own bundles.
//!
//! Bundle layout per slug: `<slug>/rule.mdc` (required), `<slug>/agent.md`
//! (optional companion document), `<slug>/rules/*.mdc` (optional sub-rules).

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{Dir, DirEntry, include_dir};
use serde::Deserialize;

use crate::error::AppError;

/// Embedded copy of the shipped agent bundles.
static AGENTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/agents");

/// Manifest file name inside a catalog.
pub const MANIFEST_FILE: &str = "manifest.json";

/// File extension required of rule files.
pub const RULE_EXTENSION: &str = ".mdc";

/// The agent manifest: which bundles exist and how they are described.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub agents: Vec<AgentEntry>,
}

/// One agent as listed in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentEntry {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Manifest {
    /// Whether a slug is listed in the manifest.
    pub fn contains(&self, slug: &str) -> bool {
        self.agents.iter().any(|agent| agent.slug == slug)
    }
}

/// Relative source path of a slug's primary rule file.
pub fn rule_source(slug: &str) -> String {
    format!("{slug}/rule.mdc")
}

/// Relative source path of a slug's companion agent document.
pub fn agent_doc_source(slug: &str) -> String {
    format!("{slug}/agent.md")
}

/// Relative source path of one of a slug's sub-rule files.
pub fn sub_rule_source(slug: &str, file_name: &str) -> String {
    format!("{slug}/rules/{file_name}")
}

#[derive(Debug, Clone)]
enum Source {
    Embedded,
    Directory(PathBuf),
}

/// Read-only access to agent bundles and their manifest.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: Source,
}

impl Catalog {
    /// Catalog backed by the bundles embedded in the binary.
    pub fn embedded() -> Self {
        Self { source: Source::Embedded }
    }

    /// Catalog backed by an on-disk directory with the embedded layout.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self { source: Source::Directory(dir.into()) }
    }

    /// Load and parse the manifest.
    pub fn manifest(&self) -> Result<Manifest, AppError> {
        let path = self.display_path(MANIFEST_FILE);
        let raw = self.read(MANIFEST_FILE)?.ok_or(AppError::CatalogMissing(path.clone()))?;
        serde_json::from_str(&raw).map_err(|err| AppError::ManifestInvalid {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }

    /// Whether a file exists at `rel` inside the catalog.
    pub fn exists(&self, rel: &str) -> bool {
        match &self.source {
            Source::Embedded => AGENTS_DIR.get_file(rel).is_some(),
            Source::Directory(dir) => dir.join(rel).is_file(),
        }
    }

    /// Read a catalog file as UTF-8 text. Returns `Ok(None)` when absent.
    pub fn read(&self, rel: &str) -> Result<Option<String>, AppError> {
        match &self.source {
            Source::Embedded => Ok(AGENTS_DIR
                .get_file(rel)
                .and_then(|file| file.contents_utf8())
                .map(|content| content.to_string())),
            Source::Directory(dir) => {
                let path = dir.join(rel);
                if !path.is_file() {
                    return Ok(None);
                }
                Ok(Some(fs::read_to_string(path)?))
            }
        }
    }

    /// List the sub-rule file names shipped for a slug, sorted.
    ///
    /// Returns `Ok(None)` when the slug has no `rules/` directory at all;
    /// files without the rule extension are ignored.
    pub fn sub_rule_files(&self, slug: &str) -> Result<Option<Vec<String>>, AppError> {
        let rel = format!("{slug}/rules");
        let mut files = match &self.source {
            Source::Embedded => {
                let Some(rules_dir) = AGENTS_DIR.get_dir(&rel) else {
                    return Ok(None);
                };
                rules_dir
                    .entries()
                    .iter()
                    .filter_map(|entry| match entry {
                        DirEntry::File(file) => file_name_of(file.path()),
                        DirEntry::Dir(_) => None,
                    })
                    .filter(|name| name.ends_with(RULE_EXTENSION))
                    .collect::<Vec<_>>()
            }
            Source::Directory(dir) => {
                let rules_dir = dir.join(&rel);
                if !rules_dir.is_dir() {
                    return Ok(None);
                }
                let mut names = Vec::new();
                for entry in fs::read_dir(&rules_dir)? {
                    let entry = entry?;
                    let path = entry.path();
                    if !path.is_file() {
                        continue;
                    }
                    if let Some(name) = file_name_of(&path) {
                        if name.ends_with(RULE_EXTENSION) {
                            names.push(name);
                        }
                    }
                }
                names
            }
        };

        files.sort();
        Ok(Some(files))
    }

    /// Human-readable location of a catalog file, for error messages.
    fn display_path(&self, rel: &str) -> PathBuf {
        match &self.source {
            Source::Embedded => PathBuf::from("<embedded>").join(rel),
            Source::Directory(dir) => dir.join(rel),
        }
    }
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().to_string())
}
