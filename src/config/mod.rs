//! Run configuration
//!
//! Settings are merged from, highest priority first:
//! 1. command line flags (and `GAENV_SITE_PACKAGES` through clap)
//! 2. `gaenv.yaml` in the working directory, if present
//! 3. built-in defaults
//!
//! Relative paths are resolved against the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::bootstrap::DEFAULT_BOOTSTRAP_FILE;
use crate::cli::Cli;
use crate::error::{Result, config as config_err};

/// Optional configuration file name
pub const CONFIG_FILE: &str = "gaenv.yaml";

/// Default requirements file
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";

/// Default output directory name
pub const DEFAULT_LIB: &str = "gaenv_lib";

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Contents of `gaenv.yaml`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub requirements: Option<PathBuf>,
    pub lib: Option<String>,
    pub bootstrap: Option<PathBuf>,
    pub site_packages: Option<PathBuf>,
    pub no_import: Option<bool>,
}

impl FileConfig {
    /// Load `gaenv.yaml` from `dir`; a missing file gives the empty config
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| crate::error::fs::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&content)
            .map_err(|e| config_err::parse_failed(path.display().to_string(), e.to_string()))
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub requirements: PathBuf,
    pub lib_name: String,
    pub lib_dir: PathBuf,
    pub bootstrap: PathBuf,
    pub site_packages: Option<PathBuf>,
    pub no_import: bool,
}

impl Settings {
    /// Merge command line and config file into settings
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let workspace = match &cli.workspace {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let file = FileConfig::load(&workspace)?;
        Self::merge(cli, file, &workspace)
    }

    fn merge(cli: &Cli, file: FileConfig, workspace: &Path) -> Result<Self> {
        let lib_name = cli
            .lib
            .clone()
            .or(file.lib)
            .unwrap_or_else(|| DEFAULT_LIB.to_string());

        if !is_python_identifier(&lib_name) {
            return Err(config_err::invalid_lib_name(lib_name));
        }

        let requirements = cli
            .requirements
            .clone()
            .or(file.requirements)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REQUIREMENTS));
        let bootstrap = cli
            .bootstrap
            .clone()
            .or(file.bootstrap)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BOOTSTRAP_FILE));
        let site_packages = cli
            .site_packages
            .clone()
            .or(file.site_packages)
            .map(|p| workspace.join(p));

        Ok(Self {
            requirements: workspace.join(requirements),
            lib_dir: workspace.join(&lib_name),
            bootstrap: workspace.join(bootstrap),
            lib_name,
            site_packages,
            no_import: cli.no_import || file.no_import.unwrap_or(false),
        })
    }
}

/// The output directory is imported by name
fn is_python_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && !PYTHON_KEYWORDS.contains(&name)
}
