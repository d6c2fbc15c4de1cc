//! Error types for formpath
//!
//! Reads never fail. Writes fail only when an existing container cannot
//! hold the requested segment, and that check runs before anything is
//! mutated.

use thiserror::Error;
use crate::core::path::{NamePath, PathError};

/// Errors that can occur while manipulating a store
#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Path error: {0}")]
    PathError(#[from] PathError),

    #[error("Invalid store shape at '{path}': {reason}")]
    InvalidStoreShape {
        path: NamePath,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub(crate) fn shape<S: Into<String>>(path: NamePath, reason: S) -> Self {
        StoreError::InvalidStoreShape {
            path,
            reason: reason.into(),
        }
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
