//! Alias file error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while persisting the alias file
#[derive(Debug, Error)]
pub enum AliasError {
    /// Writing the alias file or its count file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
