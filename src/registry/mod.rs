//! Installed-package metadata store
//!
//! The resolver only sees the [`PackageRegistry`] trait. [`SitePackages`] is
//! the on-disk implementation that reads `*.dist-info` and `*.egg-info`
//! metadata from one package directory.

pub mod site_packages;

pub use site_packages::{SitePackages, discover_site_packages};

use crate::requirement::Requirement;

/// Metadata of one installed distribution
///
/// `top_level` and `dependency_links` are exactly the lines the package
/// declared, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    pub version: String,
    pub top_level: Vec<String>,
    pub dependency_links: Vec<String>,
}

/// Outcome of a versioned lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Distribution),
    NotFound,
    /// Installed, but the installed version violates the requirement
    VersionConflict { installed: Distribution },
}

/// Query interface over the installed package set
pub trait PackageRegistry {
    /// Find a distribution matching the requirement's name and version constraint
    fn resolve(&self, requirement: &Requirement) -> Lookup {
        match self.resolve_by_name(requirement.name()) {
            None => Lookup::NotFound,
            Some(dist) if requirement.accepts(&dist.version) => Lookup::Found(dist),
            Some(dist) => Lookup::VersionConflict { installed: dist },
        }
    }

    /// Find a distribution by project name only
    fn resolve_by_name(&self, name: &str) -> Option<Distribution>;
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryRegistry;
    use super::*;

    #[test]
    fn test_resolve_found() {
        let registry = MemoryRegistry::new().with("six", "1.16.0", &["six"], &[]);
        let requirement: Requirement = "six>=1.10".parse().unwrap();

        match registry.resolve(&requirement) {
            Lookup::Found(dist) => assert_eq!(dist.top_level, vec!["six"]),
            other => panic!("Expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_normalizes_names() {
        let registry = MemoryRegistry::new().with("Flask-SQLAlchemy", "2.5", &[], &[]);
        let requirement: Requirement = "flask_sqlalchemy".parse().unwrap();

        assert!(matches!(registry.resolve(&requirement), Lookup::Found(_)));
    }

    #[test]
    fn test_resolve_version_conflict() {
        let registry = MemoryRegistry::new().with("requests", "2.1", &["requests"], &[]);
        let requirement: Requirement = "requests==2.0".parse().unwrap();

        match registry.resolve(&requirement) {
            Lookup::VersionConflict { installed } => assert_eq!(installed.version, "2.1"),
            other => panic!("Expected VersionConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_not_found() {
        let registry = MemoryRegistry::new();
        let requirement: Requirement = "missing".parse().unwrap();

        assert_eq!(registry.resolve(&requirement), Lookup::NotFound);
    }
}
