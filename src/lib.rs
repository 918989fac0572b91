//! design-agents: install Cursor AI design agents into a project.
//!
//! An agent bundle is a primary rule file (`rule.mdc`), an optional
//! companion agent document (`agent.md`), and an optional set of sub-rules,
//! shipped embedded in the binary. `add` places the bundles for the
//! requested slugs under the target project's `.cursor/` directory,
//! substituting project-specific variables into each file. Installs are
//! idempotent: existing destination files are skipped unless `--overwrite`
//! is given.

pub mod catalog;
pub mod error;
pub mod installer;
pub mod research;
pub mod variables;

use std::fs;
use std::path::PathBuf;

use crate::catalog::Manifest;
use crate::installer::AgentInstallResult;

pub use crate::catalog::Catalog;
pub use crate::error::AppError;

/// Parameters for one `add` run.
#[derive(Debug, Clone)]
pub struct AddOptions {
    pub target: PathBuf,
    pub slugs: Vec<String>,
    pub project_name: Option<String>,
    pub style_package: Option<String>,
    pub overwrite: bool,
}

/// Outcome of one requested slug within an `add` run.
#[derive(Debug)]
pub enum SlugReport {
    Installed(AgentInstallResult),
    Failed { slug: String, error: AppError },
}

/// Everything that happened during one `add` run.
#[derive(Debug, Default)]
pub struct AddSummary {
    pub reports: Vec<SlugReport>,
    pub unknown: Vec<String>,
}

impl AddSummary {
    /// True when every requested known slug installed cleanly. Unknown
    /// slugs are warnings, not failures.
    pub fn all_succeeded(&self) -> bool {
        self.reports.iter().all(|report| matches!(report, SlugReport::Installed(_)))
    }
}

/// Install the requested agents into the target project.
///
/// Progress is reported on stdout as each agent lands; per-slug failures go
/// to stderr and do not stop the remaining slugs. With no slugs at all this
/// prints the catalog listing instead.
pub fn add(catalog: &Catalog, options: &AddOptions) -> Result<AddSummary, AppError> {
    let manifest = catalog.manifest()?;

    if options.slugs.is_empty() {
        list(catalog)?;
        return Ok(AddSummary::default());
    }

    let (known, unknown) = partition_slugs(&manifest, &options.slugs);
    if known.is_empty() {
        return Err(AppError::UnknownAgents(unknown));
    }
    if !unknown.is_empty() {
        eprintln!("Unknown agent(s): {}", unknown.join(", "));
    }

    if !options.target.exists() {
        return Err(AppError::TargetMissing(std::path::absolute(&options.target)?));
    }
    let target = fs::canonicalize(&options.target)?;

    let vars = variables::resolve(
        &target,
        options.project_name.as_deref(),
        options.style_package.as_deref(),
    );

    println!("Installing into {}", target.display());
    println!(
        "  [project_folder] = {}  [project_name] = {}  [style_package] = {}",
        vars.project_folder, vars.project_name, vars.style_package
    );
    if options.overwrite {
        println!("Overwrite: yes");
    }

    let mut reports = Vec::new();
    for slug in &known {
        let outcome = installer::install_agent(catalog, slug, &target, &vars, options.overwrite);
        let report = match outcome {
            Ok(result) => {
                println!("  {}", result.summary());
                let mut report = SlugReport::Installed(result);
                if slug == research::AGENT_SLUG {
                    match research::setup_research(catalog, &target) {
                        Ok(()) => println!(
                            "  {}: research/ folder, memory, and transcript template ready",
                            research::AGENT_SLUG
                        ),
                        Err(error) => {
                            eprintln!("  {slug}: {error}");
                            report = SlugReport::Failed { slug: slug.clone(), error };
                        }
                    }
                }
                report
            }
            Err(error) => {
                eprintln!("  {slug}: {error}");
                SlugReport::Failed { slug: slug.clone(), error }
            }
        };
        reports.push(report);
    }

    Ok(AddSummary { reports, unknown })
}

/// Print the agents available in the catalog, in manifest order.
pub fn list(catalog: &Catalog) -> Result<(), AppError> {
    let manifest = catalog.manifest()?;
    let width = manifest.agents.iter().map(|agent| agent.slug.len()).max().unwrap_or(0);

    println!("Available agents:");
    for agent in &manifest.agents {
        if agent.description.is_empty() {
            println!("  {:width$}  {}", agent.slug, agent.name);
        } else {
            println!("  {:width$}  {} - {}", agent.slug, agent.name, agent.description);
        }
    }
    Ok(())
}

fn partition_slugs(manifest: &Manifest, requested: &[String]) -> (Vec<String>, Vec<String>) {
    let mut known = Vec::new();
    let mut unknown = Vec::new();
    for slug in requested {
        if manifest.contains(slug) {
            known.push(slug.clone());
        } else {
            unknown.push(slug.clone());
        }
    }
    (known, unknown)
}
