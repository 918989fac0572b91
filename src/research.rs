//! One-time scaffold for the ux-research agent's working folder.
//!
//! Installing the `ux-research` agent also prepares a `research/` tree in
//! the target project: working subdirectories with `.gitkeep` markers, a
//! seeded `.research-memory.json`, a README, a copy of the transcript
//! template, and a `.gitignore` block keeping sensitive research data out
//! of version control. Every step is create-if-absent, so the scaffold can
//! run on every install without disturbing files the user already has.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::AppError;

/// The slug whose installation triggers this scaffold.
pub const AGENT_SLUG: &str = "ux-research";

/// Root of the scaffold, relative to the target project.
pub const RESEARCH_DIR: &str = "research";

/// Seed state document inside the research root.
pub const MEMORY_FILE: &str = ".research-memory.json";

const SUBDIRS: [&str; 4] = ["transcripts", "analysis", "insights", "deliverables"];

const TEMPLATE_FILE: &str = "transcript-template.md";

const IGNORE_HEADER: &str = "# UX Research Agent - sensitive data";

const IGNORE_PATTERNS: [&str; 3] = [
    "research/.research-memory.json",
    "research/transcripts/*",
    "!research/transcripts/.gitkeep",
];

const README: &str = r#"# UX Research

This folder contains UX research data and outputs for the UX Research Agent.

## Structure

- **transcripts/** — Raw research data (interviews, tests, observations)
- **analysis/** — Agent-generated analysis of individual sessions
- **insights/** — Cross-cutting insights and affinity maps
- **deliverables/** — Final outputs (personas, journey maps, reports)

## Getting started

1. Add research data to `transcripts/` (or paste in chat and mention @ux-research)
2. In Cursor, invoke the UX Research agent (e.g. @ux-research) and ask to analyze
3. The agent writes analysis here and updates `.research-memory.json`
4. Request deliverables (persona, journey map, report) when you have enough data (5+ sessions recommended)

## Privacy

- `.research-memory.json` is git-ignored by default (may contain PII)
- Remove PII from transcripts before committing
- Use participant IDs (P001, P002, etc.) instead of names
"#;

/// Configuration block seeded into new research memory files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResearchConfig {
    pub min_theme_evidence: u32,
    pub confidence_threshold: f64,
    pub auto_save: bool,
    pub participant_anonymization: bool,
}

/// Defaults written by the scaffold; bump deliberately, existing memory
/// files are never migrated.
pub const DEFAULT_CONFIG: ResearchConfig = ResearchConfig {
    min_theme_evidence: 3,
    confidence_threshold: 0.7,
    auto_save: true,
    participant_anonymization: true,
};

impl Default for ResearchConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Project metadata inside the research memory seed.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSeed {
    pub name: String,
    pub created: String,
    pub research_questions: Vec<String>,
    pub target_audience: String,
}

/// Initial contents of `research/.research-memory.json`.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchMemory {
    pub project: ProjectSeed,
    pub participants: Vec<serde_json::Value>,
    pub themes: Vec<serde_json::Value>,
    pub insights: Vec<serde_json::Value>,
    pub deliverables: Vec<serde_json::Value>,
    pub contradictions: Vec<serde_json::Value>,
    pub config: ResearchConfig,
}

impl ResearchMemory {
    /// Fresh seed for a project, dated today.
    fn seed(project_name: String) -> Self {
        Self {
            project: ProjectSeed {
                name: project_name,
                created: Utc::now().format("%Y-%m-%d").to_string(),
                research_questions: Vec::new(),
                target_audience: String::new(),
            },
            participants: Vec::new(),
            themes: Vec::new(),
            insights: Vec::new(),
            deliverables: Vec::new(),
            contradictions: Vec::new(),
            config: ResearchConfig::default(),
        }
    }
}

/// Prepare the research workspace under `target`.
///
/// Called after a successful install of the [`AGENT_SLUG`] agent. Safe to
/// call repeatedly; a second run leaves every existing file untouched.
pub fn setup_research(catalog: &Catalog, target: &Path) -> Result<(), AppError> {
    let research_dir = target.join(RESEARCH_DIR);
    for subdir in SUBDIRS {
        let dir = research_dir.join(subdir);
        fs::create_dir_all(&dir)?;
        let gitkeep = dir.join(".gitkeep");
        if !gitkeep.exists() {
            fs::write(&gitkeep, "")?;
        }
    }

    let memory_path = research_dir.join(MEMORY_FILE);
    if !memory_path.exists() {
        let memory = ResearchMemory::seed(project_name_of(target));
        fs::write(&memory_path, serde_json::to_string_pretty(&memory)?)?;
    }

    let readme_path = research_dir.join("README.md");
    if !readme_path.exists() {
        fs::write(&readme_path, README)?;
    }

    let template_dest = research_dir.join(TEMPLATE_FILE);
    if !template_dest.exists() {
        // Copied verbatim, not substituted.
        if let Some(content) = catalog.read(&format!("{AGENT_SLUG}/{TEMPLATE_FILE}"))? {
            fs::write(&template_dest, content)?;
        }
    }

    merge_gitignore(target)?;
    Ok(())
}

/// Ensure the research ignore patterns are present in the target's
/// `.gitignore`.
///
/// Merges line-wise: pre-existing lines are preserved verbatim and only
/// genuinely missing patterns are appended. A file that already carries
/// every pattern is not written at all.
fn merge_gitignore(target: &Path) -> Result<(), AppError> {
    let path = target.join(".gitignore");
    let existing = if path.exists() { fs::read_to_string(&path)? } else { String::new() };

    let lines: HashSet<&str> = existing.lines().map(str::trim).collect();
    let missing: Vec<&str> = IGNORE_PATTERNS
        .iter()
        .copied()
        .filter(|pattern| !lines.contains(pattern))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    let header_present = lines.contains(IGNORE_HEADER);

    let mut merged = existing;
    if !merged.is_empty() {
        if !merged.ends_with('\n') {
            merged.push('\n');
        }
        merged.push('\n');
    }
    if !header_present {
        merged.push_str(IGNORE_HEADER);
        merged.push('\n');
    }
    for pattern in missing {
        merged.push_str(pattern);
        merged.push('\n');
    }

    fs::write(&path, merged)?;
    Ok(())
}

fn project_name_of(target: &Path) -> String {
    target
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}
