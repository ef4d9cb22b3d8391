//! Link set construction
//!
//! Collects the importable names declared by resolved distributions into one
//! ordered, de-duplicated set.

use indexmap::IndexSet;

use crate::registry::Distribution;

/// Module names to materialize, in first-seen order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkSet {
    names: IndexSet<String>,
}

impl LinkSet {
    /// Top-level names first, then dependency-link names, per distribution
    pub fn from_distributions<'a, I>(distributions: I) -> Self
    where
        I: IntoIterator<Item = &'a Distribution>,
    {
        let mut set = Self::default();
        for dist in distributions {
            let before = set.len();
            for name in dist.top_level.iter().chain(&dist.dependency_links) {
                set.insert(name);
            }
            tracing::debug!(
                distribution = %dist.name,
                added = set.len() - before,
                "collected module names"
            );
        }
        set
    }

    /// Returns false when the name was already present or is blank
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
