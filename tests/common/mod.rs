//! Common test utilities for gaenv integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory plus a fake `site-packages` next to it
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Project root, passed as the working directory
    pub path: PathBuf,
    /// Package directory handed to gaenv through `--site-packages`
    pub site: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("app");
        let site = temp.path().join("site-packages");
        fs::create_dir_all(&path).expect("Failed to create app directory");
        fs::create_dir_all(&site).expect("Failed to create site-packages");
        Self { temp, path, site }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Sorted names directly inside a project directory
    #[allow(dead_code)]
    pub fn list_dir(&self, path: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path.join(path))
            .expect("Failed to read directory")
            .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Register an installed distribution with `.dist-info` metadata
    #[allow(dead_code)]
    pub fn install_dist(&self, name: &str, version: &str, top_level: &[&str]) {
        write_metadata(
            &self.site.join(format!("{name}-{version}.dist-info")),
            "METADATA",
            name,
            version,
            top_level,
        );
    }

    /// Register an installed distribution with `.egg-info` metadata
    #[allow(dead_code)]
    pub fn install_egg(&self, name: &str, version: &str, top_level: &[&str]) {
        write_metadata(
            &self.site.join(format!("{name}-{version}.egg-info")),
            "PKG-INFO",
            name,
            version,
            top_level,
        );
    }

    /// Add an importable package directory to site-packages
    #[allow(dead_code)]
    pub fn package_dir(&self, name: &str) -> PathBuf {
        let dir = self.site.join(name);
        fs::create_dir_all(&dir).expect("Failed to create package dir");
        fs::write(dir.join("__init__.py"), "").expect("Failed to write __init__.py");
        dir
    }

    /// Add a single-file module to site-packages
    #[allow(dead_code)]
    pub fn module_file(&self, name: &str) -> PathBuf {
        let file = self.site.join(format!("{name}.py"));
        fs::write(&file, "").expect("Failed to write module");
        file
    }

    /// gaenv running in the project against the fake site-packages
    pub fn gaenv(&self) -> Command {
        let mut cmd = gaenv_cmd();
        cmd.current_dir(&self.path)
            .arg("--site-packages")
            .arg(&self.site);
        cmd
    }
}

fn write_metadata(dir: &Path, file: &str, name: &str, version: &str, top_level: &[&str]) {
    fs::create_dir_all(dir).expect("Failed to create metadata dir");
    fs::write(
        dir.join(file),
        format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\n"),
    )
    .expect("Failed to write metadata");
    if !top_level.is_empty() {
        let lines: String = top_level.iter().map(|t| format!("{t}\n")).collect();
        fs::write(dir.join("top_level.txt"), lines).expect("Failed to write top_level.txt");
    }
}

/// The real binary with inherited gaenv settings cleared
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn gaenv_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gaenv").unwrap();
    cmd.env_remove("GAENV_SITE_PACKAGES").env_remove("GAENV_LOG");
    cmd
}
