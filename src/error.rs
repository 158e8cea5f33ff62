//! Unified error handling for slirc-perms.
//!
//! Looking up an unknown group is not an error anywhere in this crate; it
//! shows up as `None` or an empty result. Case-folding mismatches are
//! logged and never surface here either.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors from permission index operations.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// The configuration snapshot is malformed or could not be processed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PermissionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result type for permission operations.
pub type PermissionResult<T> = Result<T, PermissionError>;
