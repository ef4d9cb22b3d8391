//! Test fixtures for reducing test setup duplication.
//!
//! ```ignore
//! use crate::test_fixtures::{FakeSitePackages, create_temp_dir};
//!
//! let site = FakeSitePackages::new();
//! site.dist_info("requests", "2.31.0", &["requests"], &[]);
//! site.package_dir("requests");
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Absolute directory for temp dirs, so they never land under the
/// current working directory when `TMPDIR` is relative.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// A throwaway `site-packages` directory populated on demand
pub struct FakeSitePackages {
    temp: TempDir,
}

impl FakeSitePackages {
    #[must_use]
    pub fn new() -> Self {
        Self {
            temp: create_temp_dir(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Add `<name>-<version>.dist-info/` and return its path
    pub fn dist_info(
        &self,
        name: &str,
        version: &str,
        top_level: &[&str],
        dependency_links: &[&str],
    ) -> PathBuf {
        let dir = self.path().join(format!("{name}-{version}.dist-info"));
        self.write_metadata(&dir, "METADATA", name, version, top_level, dependency_links);
        dir
    }

    /// Add `<name>-<version>.egg-info/` and return its path
    pub fn egg_info(
        &self,
        name: &str,
        version: &str,
        top_level: &[&str],
        dependency_links: &[&str],
    ) -> PathBuf {
        let dir = self.path().join(format!("{name}-{version}.egg-info"));
        self.write_metadata(&dir, "PKG-INFO", name, version, top_level, dependency_links);
        dir
    }

    /// Add an importable package directory with an `__init__.py`
    pub fn package_dir(&self, name: &str) -> PathBuf {
        let dir = self.path().join(name);
        fs::create_dir_all(&dir).expect("Failed to create package dir");
        fs::write(dir.join("__init__.py"), "").expect("Failed to write __init__.py");
        dir
    }

    /// Add a single-file module `<name>.py`
    pub fn module_file(&self, name: &str) -> PathBuf {
        let file = self.path().join(format!("{name}.py"));
        fs::write(&file, format!("# {name}\n")).expect("Failed to write module");
        file
    }

    fn write_metadata(
        &self,
        dir: &Path,
        metadata_name: &str,
        name: &str,
        version: &str,
        top_level: &[&str],
        dependency_links: &[&str],
    ) {
        fs::create_dir_all(dir).expect("Failed to create metadata dir");
        fs::write(
            dir.join(metadata_name),
            format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\n"),
        )
        .expect("Failed to write metadata");

        if !top_level.is_empty() {
            fs::write(dir.join("top_level.txt"), lines(top_level))
                .expect("Failed to write top_level.txt");
        }
        if !dependency_links.is_empty() {
            fs::write(dir.join("dependency_links.txt"), lines(dependency_links))
                .expect("Failed to write dependency_links.txt");
        }
    }
}

fn lines(items: &[&str]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}
