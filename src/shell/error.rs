//! Bootstrap-specific error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while installing the shell integration
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The requested shell is not bash, zsh or fish
    #[error("Unsupported shell: {0}")]
    UnsupportedShell(String),

    /// No home directory to resolve the startup file against
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// Reading or writing the startup file failed
    #[error("Failed to update {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BootstrapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unsupported_shell_display() {
        let error = BootstrapError::UnsupportedShell("tcsh".into());
        assert_eq!(error.to_string(), "Unsupported shell: tcsh");
    }

    #[test]
    fn test_io_error_keeps_path_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = BootstrapError::io("/home/user/.bashrc", io);
        assert_eq!(
            error.to_string(),
            "Failed to update /home/user/.bashrc: denied"
        );
        assert!(error.source().is_some());
    }
}
