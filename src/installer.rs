//! Installs agent bundles into a target project.
//!
//! Each agent lands as `.cursor/rules/<slug>.mdc`, an optional
//! `.cursor/agents/<slug>.md` companion document, and optional
//! `.cursor/rules/<slug>/*.mdc` sub-rules. Variable tokens are substituted
//! at install time. Existing destination files are skipped unless
//! `overwrite` is set, so re-running an install never clobbers local edits.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::{self, Catalog};
use crate::error::AppError;
use crate::variables::{self, ResolvedVars};

/// Destination directory for rule files inside a target project.
pub fn rules_dir(target: &Path) -> PathBuf {
    target.join(".cursor").join("rules")
}

/// Destination directory for companion agent documents inside a target project.
pub fn agent_docs_dir(target: &Path) -> PathBuf {
    target.join(".cursor").join("agents")
}

/// Outcome of placing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Installed,
    SkippedExists,
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStatus::Installed => write!(f, "installed"),
            InstallStatus::SkippedExists => write!(f, "skipped (exists)"),
        }
    }
}

/// A placed (or deliberately skipped) destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub status: InstallStatus,
    pub dest: PathBuf,
}

/// Counts for a batch of sub-rule files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubRuleTally {
    pub total: usize,
    pub installed: usize,
    pub skipped: usize,
}

/// What happened for one agent slug.
#[derive(Debug, Clone)]
pub struct AgentInstallResult {
    pub slug: String,
    pub rule: InstallOutcome,
    pub agent_doc: Option<InstallOutcome>,
    pub sub_rules: Option<SubRuleTally>,
}

impl AgentInstallResult {
    /// One-line report, e.g. `design-system: rule installed, agent installed,
    /// 2 sub-rule(s) installed, 0 skipped`. Segments for assets the bundle
    /// does not ship are omitted.
    pub fn summary(&self) -> String {
        let mut line = format!("{}: rule {}", self.slug, self.rule.status);
        if let Some(doc) = &self.agent_doc {
            line.push_str(&format!(", agent {}", doc.status));
        }
        if let Some(tally) = &self.sub_rules {
            line.push_str(&format!(
                ", {} sub-rule(s) installed, {} skipped",
                tally.installed, tally.skipped
            ));
        }
        line
    }
}

/// Substitute variables from a catalog source into `dest`.
fn install_file(
    catalog: &Catalog,
    source: &str,
    dest: PathBuf,
    vars: &ResolvedVars,
    overwrite: bool,
) -> Result<InstallOutcome, AppError> {
    if dest.exists() && !overwrite {
        return Ok(InstallOutcome { status: InstallStatus::SkippedExists, dest });
    }
    let content = catalog.read(source)?.ok_or_else(|| {
        AppError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("catalog source not found: {source}"),
        ))
    })?;
    fs::write(&dest, variables::substitute(&content, vars))?;
    Ok(InstallOutcome { status: InstallStatus::Installed, dest })
}

/// Install one agent bundle into `target`.
///
/// Fails when the slug ships no primary rule file; the caller decides
/// whether other slugs keep going.
pub fn install_agent(
    catalog: &Catalog,
    slug: &str,
    target: &Path,
    vars: &ResolvedVars,
    overwrite: bool,
) -> Result<AgentInstallResult, AppError> {
    let rule_source = catalog::rule_source(slug);
    if !catalog.exists(&rule_source) {
        return Err(AppError::MissingRule(slug.to_string()));
    }

    let rules_dir = rules_dir(target);
    fs::create_dir_all(&rules_dir)?;
    let rule = install_file(
        catalog,
        &rule_source,
        rules_dir.join(format!("{slug}.mdc")),
        vars,
        overwrite,
    )?;

    let agent_doc_source = catalog::agent_doc_source(slug);
    let agent_doc = if catalog.exists(&agent_doc_source) {
        let docs_dir = agent_docs_dir(target);
        fs::create_dir_all(&docs_dir)?;
        Some(install_file(
            catalog,
            &agent_doc_source,
            docs_dir.join(format!("{slug}.md")),
            vars,
            overwrite,
        )?)
    } else {
        None
    };

    let sub_rules = match catalog.sub_rule_files(slug)? {
        Some(files) => {
            let dest_dir = rules_dir.join(slug);
            fs::create_dir_all(&dest_dir)?;
            let mut tally = SubRuleTally { total: files.len(), ..Default::default() };
            for file_name in &files {
                let outcome = install_file(
                    catalog,
                    &catalog::sub_rule_source(slug, file_name),
                    dest_dir.join(file_name),
                    vars,
                    overwrite,
                )?;
                match outcome.status {
                    InstallStatus::Installed => tally.installed += 1,
                    InstallStatus::SkippedExists => tally.skipped += 1,
                }
            }
            Some(tally)
        }
        None => None,
    };

    Ok(AgentInstallResult { slug: slug.to_string(), rule, agent_doc, sub_rules })
}
