//! Shared harness for CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch project directory plus a command builder aimed at it.
pub struct TestContext {
    tmp: TempDir,
    project: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        Self::named("app")
    }

    /// Scratch project with a chosen directory name, for tests that rely on
    /// the basename fallback of variable resolution.
    pub fn named(dir_name: &str) -> Self {
        let tmp = TempDir::new().expect("Failed to create temp directory for tests");
        let project = tmp.path().join(dir_name);
        fs::create_dir_all(&project).expect("Failed to create test project directory");
        Self { tmp, project }
    }

    /// Command under test, running inside the scratch project so the
    /// default `--target .` points at it.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("design-agents").expect("Failed to locate design-agents binary");
        cmd.current_dir(&self.project);
        cmd
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn write_package_json(&self, name: &str) {
        let body = format!("{{ \"name\": \"{name}\", \"version\": \"0.0.0\" }}");
        fs::write(self.project.join("package.json"), body).expect("Failed to write package.json");
    }

    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.project.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(path, content).expect("Failed to write project file");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.project.join(rel))
            .unwrap_or_else(|err| panic!("read {rel}: {err}"))
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.project.join(rel).exists()
    }

    /// Root of an on-disk catalog for `--agents-dir` runs.
    pub fn catalog_root(&self) -> PathBuf {
        self.tmp.path().join("catalog")
    }

    pub fn write_catalog_manifest(&self, json: &str) {
        self.write_catalog_file("manifest.json", json);
    }

    pub fn write_catalog_file(&self, rel: &str, content: &str) {
        let path = self.catalog_root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create catalog directories");
        }
        fs::write(path, content).expect("Failed to write catalog file");
    }
}
