//! Requirements manifest errors

use super::GaenvError;

/// Creates a manifest not found error
pub fn not_found(path: impl Into<String>) -> GaenvError {
    GaenvError::ManifestNotFound { path: path.into() }
}

/// Creates a manifest read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> GaenvError {
    GaenvError::ManifestReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an include cycle error from the chain of manifests, closing entry included
pub fn cycle<I, S>(chain: I) -> GaenvError
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let chain: Vec<String> = chain.into_iter().map(Into::into).collect();
    GaenvError::ManifestCycle {
        chain: chain.join(" -> "),
    }
}

/// Creates a missing include path error
pub fn missing_include_path(path: impl Into<String>, line: impl Into<String>) -> GaenvError {
    GaenvError::MissingIncludePath {
        path: path.into(),
        line: line.into(),
    }
}
