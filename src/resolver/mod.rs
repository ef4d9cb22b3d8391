//! Distribution resolution
//!
//! Maps manifest entries to installed distributions. Nothing here is fatal:
//! every requirement that can not be satisfied becomes a [`ResolveIssue`] and
//! is left out of the result.

use std::fmt;

use crate::manifest::Manifest;
use crate::registry::{Distribution, Lookup, PackageRegistry};
use crate::requirement::{self, Requirement};

/// A requirement that was excluded, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveIssue {
    /// The line does not follow the requirement grammar
    Invalid { line: String, reason: String },
    /// Nothing installed under that name
    NotInstalled { requirement: String },
    /// Installed, but not at an acceptable version
    VersionConflict {
        requirement: String,
        installed: String,
    },
    /// A VCS line that names no package through `egg=`
    MissingEgg { line: String },
}

impl fmt::Display for ResolveIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveIssue::Invalid { line, reason } => {
                write!(f, "Invalid requirement [{line}]: {reason}")
            }
            ResolveIssue::NotInstalled { requirement } => {
                write!(f, "Please install [{requirement}]")
            }
            ResolveIssue::VersionConflict {
                requirement,
                installed,
            } => write!(
                f,
                "Version don't match [{requirement}] (installed {installed}) - create virtualenv or match the version"
            ),
            ResolveIssue::MissingEgg { line } => {
                write!(f, "Skipped [{line}]: no #egg=<name> to look up")
            }
        }
    }
}

/// Distributions found plus the requirements that were dropped
#[derive(Debug, Default)]
pub struct Resolution {
    pub distributions: Vec<Distribution>,
    pub issues: Vec<ResolveIssue>,
}

/// Resolves manifest entries against a package registry
pub struct Resolver<'a, R: PackageRegistry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: PackageRegistry + ?Sized> Resolver<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Resolve PYPI entries first, then VCS entries, each in manifest order
    pub fn resolve(&self, manifest: &Manifest) -> Resolution {
        let mut resolution = Resolution::default();

        for line in &manifest.pypi {
            match line.parse::<Requirement>() {
                Ok(requirement) => self.resolve_pypi(&requirement, &mut resolution),
                Err(e) => resolution.issues.push(ResolveIssue::Invalid {
                    line: line.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        for line in &manifest.vcs {
            self.resolve_vcs(line, &mut resolution);
        }

        tracing::debug!(
            resolved = resolution.distributions.len(),
            skipped = resolution.issues.len(),
            "resolution finished"
        );

        resolution
    }

    fn resolve_pypi(&self, requirement: &Requirement, resolution: &mut Resolution) {
        match self.registry.resolve(requirement) {
            Lookup::Found(dist) => {
                tracing::debug!(requirement = %requirement, version = %dist.version, "resolved");
                resolution.distributions.push(dist);
            }
            Lookup::NotFound => resolution.issues.push(ResolveIssue::NotInstalled {
                requirement: requirement.to_string(),
            }),
            Lookup::VersionConflict { installed } => {
                resolution.issues.push(ResolveIssue::VersionConflict {
                    requirement: requirement.to_string(),
                    installed: installed.version,
                });
            }
        }
    }

    /// VCS lines carry no constraint the installed metadata understands, so
    /// only the egg name is looked up
    fn resolve_vcs(&self, line: &str, resolution: &mut Resolution) {
        let Some(egg) = requirement::egg_name(line) else {
            tracing::debug!(line, "no egg fragment");
            resolution.issues.push(ResolveIssue::MissingEgg {
                line: line.to_string(),
            });
            return;
        };

        match self.registry.resolve_by_name(&egg) {
            Some(dist) => {
                tracing::debug!(egg = %egg, version = %dist.version, "resolved vcs requirement");
                resolution.distributions.push(dist);
            }
            None => resolution.issues.push(ResolveIssue::NotInstalled {
                requirement: line.to_string(),
            }),
        }
    }
}
