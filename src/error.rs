use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for design-agents operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// JSON serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The requested agent ships no primary rule file.
    #[error("Agent \"{0}\" has no rule.mdc")]
    MissingRule(String),

    /// The install target directory does not exist.
    #[error("Target directory does not exist: {}", .0.display())]
    TargetMissing(PathBuf),

    /// An agent catalog has no manifest file.
    #[error("No agent manifest found at {}", .0.display())]
    CatalogMissing(PathBuf),

    /// The agent manifest exists but cannot be parsed.
    #[error("Invalid agent manifest at {path}: {reason}")]
    ManifestInvalid { path: String, reason: String },

    /// None of the requested slugs exist in the manifest.
    #[error(
        "No valid agent slugs: {}. Run 'design-agents list' to see available agents.",
        .0.join(", ")
    )]
    UnknownAgents(Vec<String>),
}
