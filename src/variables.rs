//! Project variable resolution and template substitution.
//!
//! Installed templates may reference three placeholder tokens, replaced
//! literally at install time:
//!
//! - `[project_folder]` is the npm scope (e.g. `"vibe"` from `"@vibe/core"`),
//! - `[project_name]` is the scope with its first character upper-cased,
//! - `[style_package]` is the style/tokens package name.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Immutable substitution variables, computed once per run and shared across
/// every file of every installed agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVars {
    /// Short slug identifying the project namespace.
    pub project_folder: String,
    /// `project_folder` with the first character upper-cased; used in prose.
    pub project_name: String,
    /// Companion style/tokens package name.
    pub style_package: String,
}

/// Minimal view of a target project's `package.json`.
#[derive(Debug, Deserialize)]
struct PackageDescriptor {
    #[serde(default)]
    name: Option<String>,
}

/// Extract the npm scope from a package-style name.
///
/// `"@vibe/core"` → `"vibe"`, `"@acme"` → `"acme"`, `"myapp"` → `"myapp"`.
pub fn extract_scope(name: &str) -> &str {
    let stripped = name.strip_prefix('@').unwrap_or(name);
    match stripped.find('/') {
        Some(idx) => &stripped[..idx],
        None => stripped,
    }
}

/// Resolve substitution variables for a target directory.
///
/// Scope priority: explicit override, then the target's `package.json`
/// `"name"` field, then the directory basename. A malformed or unreadable
/// `package.json` is treated as absent. An explicit override that extracts to
/// an empty scope is accepted as-is and yields the degenerate `"-style"`
/// default.
pub fn resolve(
    target_dir: &Path,
    project_name: Option<&str>,
    style_package: Option<&str>,
) -> ResolvedVars {
    let scope = match project_name {
        Some(name) => extract_scope(name).to_string(),
        None => scope_from_descriptor(target_dir).unwrap_or_else(|| dir_basename(target_dir)),
    };

    let project_name = capitalize_first(&scope);
    let style_package = match style_package {
        Some(pkg) => pkg.to_string(),
        None => format!("{scope}-style"),
    };

    ResolvedVars { project_folder: scope, project_name, style_package }
}

/// Replace the three placeholder tokens with their resolved values.
///
/// Replacement is literal and global; no escaping syntax exists. The tokens
/// are mutually exclusive strings, so replacement order does not matter.
pub fn substitute(content: &str, vars: &ResolvedVars) -> String {
    content
        .replace("[project_folder]", &vars.project_folder)
        .replace("[project_name]", &vars.project_name)
        .replace("[style_package]", &vars.style_package)
}

fn scope_from_descriptor(target_dir: &Path) -> Option<String> {
    let raw = fs::read_to_string(target_dir.join("package.json")).ok()?;
    let descriptor: PackageDescriptor = serde_json::from_str(&raw).ok()?;
    let name = descriptor.name?;
    let scope = extract_scope(&name);
    if scope.is_empty() { None } else { Some(scope.to_string()) }
}

fn dir_basename(target_dir: &Path) -> String {
    target_dir.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
}

/// Upper-case only the first character; characters without an upper-case
/// mapping pass through unchanged.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
