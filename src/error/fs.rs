//! File system errors

use super::GaenvError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> GaenvError {
    GaenvError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> GaenvError {
    GaenvError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a remove failed error
pub fn remove_failed(path: impl Into<String>, reason: impl Into<String>) -> GaenvError {
    GaenvError::RemoveFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
