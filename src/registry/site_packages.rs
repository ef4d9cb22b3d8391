//! On-disk registry over a Python `site-packages` directory
//!
//! Recognized entries, one level below the root:
//! - `<name>-<version>.dist-info/` with `METADATA`
//! - `<name>-<version>.egg-info/` with `PKG-INFO`
//! - `<name>-<version>.egg-info` as a plain file holding PKG-INFO content
//!
//! `top_level.txt` and `dependency_links.txt` next to the metadata file
//! provide the importable names.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use super::{Distribution, PackageRegistry};
use crate::error::{Result, link as link_err};
use crate::requirement::normalize_name;

const TOP_LEVEL_FILE: &str = "top_level.txt";
const DEPENDENCY_LINKS_FILE: &str = "dependency_links.txt";

/// Interpreters asked for their package directory, in order
const INTERPRETERS: [&str; 2] = ["python3", "python"];
const PURELIB_QUERY: &str = "import sysconfig; print(sysconfig.get_path('purelib'))";

/// Installed distributions found in one package directory
#[derive(Debug)]
pub struct SitePackages {
    root: PathBuf,
    packages: HashMap<String, Distribution>,
}

impl SitePackages {
    /// Scan `root` for distribution metadata.
    ///
    /// Entries are visited in file name order and the first one per normalized
    /// project name wins. An entry whose metadata can not be read is logged
    /// and skipped.
    pub fn scan(root: &Path) -> Result<Self> {
        let mut packages = HashMap::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let Some(dist) = read_distribution(entry.path()) else {
                continue;
            };

            tracing::debug!(name = %dist.name, version = %dist.version, "found distribution");
            packages.entry(normalize_name(&dist.name)).or_insert(dist);
        }

        if packages.is_empty() && !root.is_dir() {
            return Err(link_err::site_packages_not_found(root.display().to_string()));
        }

        Ok(Self {
            root: root.to_path_buf(),
            packages,
        })
    }

    /// The directory that link sources are looked up in
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }
}

impl PackageRegistry for SitePackages {
    fn resolve_by_name(&self, name: &str) -> Option<Distribution> {
        self.packages.get(&normalize_name(name)).cloned()
    }
}

/// Locate the metadata file for a directory entry, if it is a distribution
fn metadata_file(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?.to_str()?;

    if file_name.ends_with(".dist-info") && path.is_dir() {
        Some(path.join("METADATA"))
    } else if file_name.ends_with(".egg-info") {
        if path.is_dir() {
            Some(path.join("PKG-INFO"))
        } else {
            Some(path.to_path_buf())
        }
    } else {
        None
    }
}

fn read_distribution(path: &Path) -> Option<Distribution> {
    let metadata_path = metadata_file(path)?;
    let (fallback_name, fallback_version) = name_from_entry(path);

    let headers = match fs::read_to_string(&metadata_path) {
        Ok(content) => parse_headers(&content),
        Err(e) => {
            tracing::warn!(path = %metadata_path.display(), error = %e, "cannot read package metadata");
            return None;
        }
    };

    let name = headers.name.or(fallback_name)?;
    let version = headers.version.or(fallback_version).unwrap_or_default();

    let (top_level, dependency_links) = if path.is_dir() {
        (
            metadata_lines(&path.join(TOP_LEVEL_FILE)),
            metadata_lines(&path.join(DEPENDENCY_LINKS_FILE)),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    Some(Distribution {
        name,
        version,
        top_level,
        dependency_links,
    })
}

/// `six-1.16.0.dist-info` -> (`six`, `1.16.0`)
fn name_from_entry(path: &Path) -> (Option<String>, Option<String>) {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return (None, None);
    };
    let mut parts = stem.splitn(3, '-');
    let name = parts.next().filter(|n| !n.is_empty()).map(String::from);
    let version = parts.next().filter(|v| !v.is_empty()).map(String::from);
    (name, version)
}

#[derive(Debug, Default)]
struct Headers {
    name: Option<String>,
    version: Option<String>,
}

/// Read `Name:` and `Version:` from the RFC 822 header block
fn parse_headers(content: &str) -> Headers {
    let mut headers = Headers::default();

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "name" if headers.name.is_none() && !value.is_empty() => {
                headers.name = Some(value.to_string());
            }
            "version" if headers.version.is_none() && !value.is_empty() => {
                headers.version = Some(value.to_string());
            }
            _ => {}
        }
    }

    headers
}

/// Non-blank, non-comment lines of an optional metadata text file
fn metadata_lines(path: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Find the package directory that links point into.
///
/// An explicit directory (flag, environment or config file) wins and must
/// exist. Otherwise the local Python interpreter is asked for its `purelib`
/// path.
pub fn discover_site_packages(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if dir.is_dir() {
            return Ok(dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf()));
        }
        return Err(link_err::site_packages_not_found(dir.display().to_string()));
    }

    for interpreter in INTERPRETERS {
        let output = match Command::new(interpreter).args(["-c", PURELIB_QUERY]).output() {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::debug!(interpreter, status = %output.status, "interpreter query failed");
                continue;
            }
            Err(e) => {
                tracing::debug!(interpreter, error = %e, "interpreter not available");
                continue;
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = PathBuf::from(stdout.trim());
        if !path.as_os_str().is_empty() && path.is_dir() {
            tracing::debug!(interpreter, path = %path.display(), "using interpreter package directory");
            return Ok(dunce::canonicalize(&path).unwrap_or(path));
        }
    }

    Err(link_err::site_packages_not_found(INTERPRETERS.join(", ")))
}
