use formpath::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid path '{0}': {1}")]
    InvalidPath(String, String),

    #[error("Nothing stored at '{0}'")]
    NotFound(String),
}
