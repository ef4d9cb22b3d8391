//! Managed output directory
//!
//! The output directory belongs to gaenv. Each run empties it, writes the
//! `__init__.py` marker that puts the directory on `sys.path`, and links every
//! module of the [`LinkSet`] from the package directory into it.

pub mod link;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_err};
use crate::links::LinkSet;

pub use link::{LinkCreator, LinkKind};

/// Marker file written into the managed directory
pub const MARKER_FILE: &str = "__init__.py";

/// Importing the managed directory prepends it to the module search path
pub const MARKER_CONTENT: &str = "# Auto generated by gaenv
import sys
import os
sys.path.insert(0, os.path.dirname(__file__))";

/// What happened to one module name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// Link created from `source`
    Linked { source: PathBuf },
    /// Neither `<name>/` nor `<name>.py` exists in the package directory
    SourceMissing,
    /// The destination was already taken earlier in this run
    AlreadyPresent,
    /// Not a bare module name (a URL or a path), never linked
    InvalidName,
}

/// Per-module result of a reconcile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub name: String,
    pub status: LinkStatus,
}

impl LinkOutcome {
    /// True for outcomes that left something out
    pub fn is_skipped(&self) -> bool {
        !matches!(self.status, LinkStatus::Linked { .. })
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            LinkStatus::Linked { .. } => write!(f, "Linked: {}", self.name),
            LinkStatus::SourceMissing => {
                write!(f, "Skipped: {} (no package or module found)", self.name)
            }
            LinkStatus::AlreadyPresent => write!(f, "Skipped: {} (already linked)", self.name),
            LinkStatus::InvalidName => write!(f, "Skipped: {} (not a module name)", self.name),
        }
    }
}

/// Links modules from a package directory into a managed directory
pub struct Reconciler<'a> {
    package_root: &'a Path,
    linker: &'a dyn LinkCreator,
}

impl<'a> Reconciler<'a> {
    pub fn new(package_root: &'a Path, linker: &'a dyn LinkCreator) -> Self {
        Self {
            package_root,
            linker,
        }
    }

    /// Reset `out_dir`, write the marker and link every target.
    ///
    /// Missing sources are reported in the returned outcomes. A link the
    /// platform refuses to create aborts the run.
    pub fn reconcile(&self, out_dir: &Path, targets: &LinkSet) -> Result<Vec<LinkOutcome>> {
        reset_directory(out_dir)?;
        write_marker(out_dir)?;

        tracing::debug!(
            linker = self.linker.name(),
            targets = targets.len(),
            "materializing links"
        );

        targets
            .iter()
            .map(|name| self.link_one(out_dir, name))
            .collect()
    }

    fn link_one(&self, out_dir: &Path, name: &str) -> Result<LinkOutcome> {
        let outcome = |status| LinkOutcome {
            name: name.to_string(),
            status,
        };

        if !is_module_name(name) {
            return Ok(outcome(LinkStatus::InvalidName));
        }

        let Some((source, file_name, kind)) = self.locate(name) else {
            tracing::debug!(name, root = %self.package_root.display(), "no source for module");
            return Ok(outcome(LinkStatus::SourceMissing));
        };

        let dest = out_dir.join(file_name);
        if fs::symlink_metadata(&dest).is_ok() {
            return Ok(outcome(LinkStatus::AlreadyPresent));
        }

        self.linker.create(&source, &dest, kind)?;
        tracing::debug!(source = %source.display(), dest = %dest.display(), "linked");

        Ok(outcome(LinkStatus::Linked { source }))
    }

    /// Package directory first, then single-file module
    fn locate(&self, name: &str) -> Option<(PathBuf, String, LinkKind)> {
        let dir = self.package_root.join(name);
        if dir.is_dir() {
            return Some((dir, name.to_string(), LinkKind::Directory));
        }

        let file_name = format!("{name}.py");
        let file = self.package_root.join(&file_name);
        if file.is_file() {
            return Some((file, file_name, LinkKind::File));
        }

        None
    }
}

/// A bare file name: no separators, not `.` or `..`
fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':'])
}

/// Create `dir` or delete everything directly inside it.
///
/// Symlinks are unlinked, never followed.
pub fn reset_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return fs::create_dir_all(dir)
            .map_err(|e| fs_err::write_failed(dir.display().to_string(), e.to_string()));
    }

    let entries =
        fs::read_dir(dir).map_err(|e| fs_err::read_failed(dir.display().to_string(), e.to_string()))?;

    for entry in entries {
        let entry = entry.map_err(|e| fs_err::read_failed(dir.display().to_string(), e.to_string()))?;
        let path = entry.path();
        remove_entry(&path)
            .map_err(|e| fs_err::remove_failed(path.display().to_string(), e.to_string()))?;
        tracing::debug!(path = %path.display(), "removed stale entry");
    }

    Ok(())
}

fn remove_entry(path: &Path) -> std::io::Result<()> {
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else if file_type.is_symlink() {
        // Directory symlinks on Windows are removed like directories
        fs::remove_file(path).or_else(|_| fs::remove_dir(path))
    } else {
        fs::remove_file(path)
    }
}

fn write_marker(dir: &Path) -> Result<()> {
    let marker = dir.join(MARKER_FILE);
    fs::write(&marker, MARKER_CONTENT)
        .map_err(|e| fs_err::write_failed(marker.display().to_string(), e.to_string()))
}
