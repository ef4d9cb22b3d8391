//! Link creation and package directory errors

use super::GaenvError;

/// Creates a symlink permission denied error
pub fn permission_denied(link: impl Into<String>, reason: impl Into<String>) -> GaenvError {
    GaenvError::SymlinkPermissionDenied {
        link: link.into(),
        reason: reason.into(),
    }
}

/// Creates a generic symlink failure
pub fn failed(
    link: impl Into<String>,
    source_path: impl Into<String>,
    reason: impl Into<String>,
) -> GaenvError {
    GaenvError::SymlinkFailed {
        link: link.into(),
        source_path: source_path.into(),
        reason: reason.into(),
    }
}

/// Creates a site-packages not found error listing what was tried
pub fn site_packages_not_found(tried: impl Into<String>) -> GaenvError {
    GaenvError::SitePackagesNotFound {
        tried: tried.into(),
    }
}
