//! Requirement specifiers
//!
//! PYPI-kind manifest lines are parsed with the PEP 508 grammar from
//! `pep508_rs` and installed versions are checked against their
//! `pep440_rs::VersionSpecifiers`. VCS-kind lines only contribute the name in
//! their `egg=` fragment. Environment markers are kept for display but never
//! evaluated.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use pep440_rs::{Version, VersionSpecifiers};
use pep508_rs::VersionOrUrl;
use regex::Regex;
use thiserror::Error;

/// Why a requirement line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ParseError {
    pub reason: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[allow(clippy::expect_used)]
static EGG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"egg=([^&]+)").expect("egg regex is valid"));

#[allow(clippy::expect_used)]
static NORMALIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("normalize regex is valid"));

/// Canonical form of a project name: lowercase, separator runs become `-`
pub fn normalize_name(name: &str) -> String {
    NORMALIZE_RE
        .replace_all(name.trim(), "-")
        .to_ascii_lowercase()
}

/// The package name carried by a VCS requirement's `egg=` fragment, if any.
/// When several fragments are present the last one wins.
pub fn egg_name(line: &str) -> Option<String> {
    EGG_RE
        .captures_iter(line)
        .last()
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Drop a trailing `# comment` (a `#` at line start or after whitespace)
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
            return &line[..i];
        }
    }
    line
}

/// Drop per-requirement pip options such as `--hash=sha256:...`
fn strip_options(line: &str) -> &str {
    line.find(" --")
        .or_else(|| line.find("\t--"))
        .map_or(line, |i| &line[..i])
}

/// A parsed PYPI requirement
#[derive(Debug, Clone)]
pub struct Requirement {
    name: String,
    inner: pep508_rs::Requirement,
}

impl Requirement {
    /// Normalized project name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn specifiers(&self) -> Option<&VersionSpecifiers> {
        match &self.inner.version_or_url {
            Some(VersionOrUrl::VersionSpecifier(specifiers)) => Some(specifiers),
            Some(VersionOrUrl::Url(_)) | None => None,
        }
    }

    /// Does the installed version satisfy the requirement.
    ///
    /// Installed pre-releases are accepted. An installed version that is not
    /// PEP 440 only satisfies a requirement without specifiers.
    pub fn accepts(&self, installed: &str) -> bool {
        let Some(specifiers) = self.specifiers() else {
            return true;
        };

        match Version::from_str(installed.trim()) {
            Ok(version) => specifiers.contains(&version),
            Err(e) => {
                tracing::debug!(installed, error = %e, "installed version is not PEP 440");
                specifiers.is_empty()
            }
        }
    }
}

impl FromStr for Requirement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = strip_options(strip_comment(s)).trim();
        if line.is_empty() {
            return Err(ParseError::new("empty requirement"));
        }

        let inner = pep508_rs::Requirement::from_str(line)
            .map_err(|e| ParseError::new(e.to_string()))?;

        Ok(Self {
            name: inner.name.to_string(),
            inner,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
