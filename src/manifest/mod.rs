//! Requirements manifest parsing
//!
//! Reads a pip-style requirements file and splits its entries into two
//! ordered lists:
//! - PYPI entries: plain specifiers such as `requests==2.0`
//! - VCS entries: anything containing a `+`, such as `-e git+https://...#egg=name`
//!
//! `-r` / `--requirement` directives are expanded in place. Other `--` options,
//! comments and blank lines are dropped.
//!
//! The `+` test is a heuristic: a local version like `pkg==1.0+local` is
//! classified as VCS too.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, manifest as manifest_err};

/// Kind of a requirement line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    /// Plain index requirement, parsed with the specifier grammar
    Pypi,
    /// URL/VCS requirement, only its `egg=` fragment is used
    Vcs,
}

/// One classified requirement line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSpec {
    pub raw: String,
    pub kind: RequirementKind,
}

impl RequirementSpec {
    fn classify(line: &str) -> Self {
        let kind = if line.contains('+') {
            RequirementKind::Vcs
        } else {
            RequirementKind::Pypi
        };
        Self {
            raw: line.to_string(),
            kind,
        }
    }
}

/// Parsed manifest contents in encounter order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub pypi: Vec<String>,
    pub vcs: Vec<String>,
}

impl Manifest {
    /// Returns true when the manifest declares nothing to resolve
    pub fn is_empty(&self) -> bool {
        self.pypi.is_empty() && self.vcs.is_empty()
    }

    fn push(&mut self, spec: RequirementSpec) {
        match spec.kind {
            RequirementKind::Pypi => self.pypi.push(spec.raw),
            RequirementKind::Vcs => self.vcs.push(spec.raw),
        }
    }
}

/// What a single trimmed line means
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Include(Option<&'a str>),
    Requirement(RequirementSpec),
}

fn classify_line(line: &str) -> Line<'_> {
    if line.is_empty() || line.starts_with('#') {
        return Line::Skip;
    }

    if let Some(rest) = line.strip_prefix("--requirement") {
        let rest = rest.strip_prefix('=').unwrap_or(rest);
        return Line::Include(rest.split_whitespace().next());
    }

    if let Some(rest) = line.strip_prefix("-r") {
        return Line::Include(rest.split_whitespace().next());
    }

    if line.starts_with("--") {
        return Line::Skip;
    }

    Line::Requirement(RequirementSpec::classify(line))
}

/// A manifest being read, with the lines not yet consumed
struct Frame {
    path: PathBuf,
    key: PathBuf,
    lines: std::vec::IntoIter<String>,
}

impl Frame {
    fn open(path: PathBuf) -> Result<Self> {
        let shown = path.display().to_string();

        if !path.is_file() {
            return Err(manifest_err::not_found(shown));
        }

        let content =
            fs::read_to_string(&path).map_err(|e| manifest_err::read_failed(&shown, e.to_string()))?;
        let key = dunce::canonicalize(&path).unwrap_or_else(|_| path.clone());

        tracing::debug!(path = %shown, "reading requirements file");

        let lines: Vec<String> = content.lines().map(|l| l.trim().to_string()).collect();
        Ok(Self {
            path,
            key,
            lines: lines.into_iter(),
        })
    }

    fn include_path(&self, target: &str) -> PathBuf {
        let target = Path::new(target);
        if target.is_absolute() {
            return target.to_path_buf();
        }
        match self.path.parent() {
            Some(dir) => dir.join(target),
            None => target.to_path_buf(),
        }
    }
}

/// Parse a requirements file, expanding `-r` includes in place.
///
/// A missing or unreadable file anywhere in the include tree is fatal, and so
/// is an include that points back at a manifest on the current include chain.
/// The same file included from two branches is read twice.
pub fn parse(path: &Path) -> Result<Manifest> {
    let mut manifest = Manifest::default();
    let mut stack = vec![Frame::open(path.to_path_buf())?];

    while let Some(frame) = stack.last_mut() {
        let Some(line) = frame.lines.next() else {
            stack.pop();
            continue;
        };

        match classify_line(&line) {
            Line::Skip => {}
            Line::Requirement(spec) => manifest.push(spec),
            Line::Include(None) => {
                return Err(manifest_err::missing_include_path(
                    frame.path.display().to_string(),
                    line.clone(),
                ));
            }
            Line::Include(Some(target)) => {
                let include = frame.include_path(target);
                let child = Frame::open(include)?;

                if let Some(start) = stack.iter().position(|f| f.key == child.key) {
                    let chain = stack[start..]
                        .iter()
                        .map(|f| f.path.display().to_string())
                        .chain(std::iter::once(child.path.display().to_string()));
                    return Err(manifest_err::cycle(chain));
                }

                stack.push(child);
            }
        }
    }

    tracing::debug!(
        pypi = manifest.pypi.len(),
        vcs = manifest.vcs.len(),
        "parsed requirements"
    );

    Ok(manifest)
}
