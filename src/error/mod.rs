//! Error types and handling for gaenv
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only fatal conditions live here. Per-item problems (a requirement that is
//! not installed, a module without a source on disk) are returned as data by
//! the component that found them and never become a `GaenvError`.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Requirements manifest errors
//! - [`link`]: Link creation and site-packages errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod link;
pub mod manifest;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for gaenv operations
#[derive(Error, Diagnostic, Debug)]
pub enum GaenvError {
    // Manifest errors
    #[error("requirements file {path} not found")]
    #[diagnostic(
        code(gaenv::manifest::not_found),
        help("Pass the manifest location with --requirements <FILE>")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to read requirements file {path}: {reason}")]
    #[diagnostic(code(gaenv::manifest::read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Include cycle in requirements files: {chain}")]
    #[diagnostic(
        code(gaenv::manifest::cycle),
        help("Remove one of the -r directives so the includes form a tree")
    )]
    ManifestCycle { chain: String },

    #[error("Include directive without a path in {path}: {line}")]
    #[diagnostic(code(gaenv::manifest::missing_include_path))]
    MissingIncludePath { path: String, line: String },

    // Link errors
    #[error("Permission denied creating symlink {link}")]
    #[diagnostic(
        code(gaenv::link::permission_denied),
        help(
            "Symbolic links need developer mode or an elevated shell on this platform; \
             gaenv never falls back to copying packages"
        )
    )]
    SymlinkPermissionDenied { link: String, reason: String },

    #[error("Failed to create symlink {link} -> {source_path}: {reason}")]
    #[diagnostic(code(gaenv::link::failed))]
    SymlinkFailed {
        link: String,
        source_path: String,
        reason: String,
    },

    #[error("Python package directory not found (tried: {tried})")]
    #[diagnostic(
        code(gaenv::link::site_packages_not_found),
        help("Pass --site-packages <DIR> or set GAENV_SITE_PACKAGES")
    )]
    SitePackagesNotFound { tried: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(gaenv::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid output directory name '{name}'")]
    #[diagnostic(
        code(gaenv::config::invalid_lib_name),
        help("The output directory is imported by name, so it must be a valid Python identifier")
    )]
    InvalidLibName { name: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(gaenv::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(gaenv::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove {path}: {reason}")]
    #[diagnostic(code(gaenv::fs::remove_failed))]
    RemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(gaenv::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for GaenvError {
    fn from(err: std::io::Error) -> Self {
        GaenvError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GaenvError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = GaenvError::ManifestNotFound {
            path: "/app/requirements.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "requirements file /app/requirements.txt not found"
        );
    }

    #[test]
    fn test_error_code() {
        let err = manifest::cycle(["a.txt", "b.txt", "a.txt"]);
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("gaenv::manifest::cycle".to_string())
        );
    }

    #[test]
    fn test_permission_denied_has_help() {
        let err = link::permission_denied("/app/gaenv_lib/six.py", "os error 1314");
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("developer mode"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GaenvError = io_err.into();
        assert!(matches!(err, GaenvError::IoError { .. }));
    }

    test_error_contains!(
        test_cycle_shows_chain,
        manifest::cycle(["requirements.txt", "base.txt", "requirements.txt"]),
        "requirements.txt -> base.txt -> requirements.txt"
    );

    test_error_contains!(
        test_missing_include_path,
        manifest::missing_include_path("requirements.txt", "-r"),
        "Include directive without a path",
        "-r"
    );

    test_error_contains!(
        test_site_packages_not_found,
        link::site_packages_not_found("python3, python"),
        "Python package directory not found"
    );

    test_error_contains!(
        test_invalid_lib_name,
        config::invalid_lib_name("my-lib"),
        "Invalid output directory name 'my-lib'"
    );

    test_error_contains!(
        test_file_write_failed,
        fs::write_failed("/app/appengine_config.py", "disk full"),
        "Failed to write file",
        "disk full"
    );
}
