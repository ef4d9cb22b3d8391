//! Configuration errors

use super::GaenvError;

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> GaenvError {
    GaenvError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid output directory name error
pub fn invalid_lib_name(name: impl Into<String>) -> GaenvError {
    GaenvError::InvalidLibName { name: name.into() }
}
