//! rig - ripgrep with numbered shell aliases for every match
//!
//! This library runs ripgrep in JSON mode, decodes its event stream and
//! writes a file of shell aliases (`e1`, `e2`, ...) that open an editor at
//! each match. A one-time bootstrap step installs the shell functions that
//! source that file after every search.

use thiserror::Error;

pub mod aliases;
pub mod cli;
pub mod commands;
pub mod config;
pub mod decoder;
pub mod output;
pub mod shell;
pub mod template;
pub mod version;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RigError {
    /// ripgrep produced output that could not be decoded
    #[error("Search output error: {0}")]
    Decode(#[from] decoder::DecodeError),
    /// The alias file could not be written
    #[error("Alias file error: {0}")]
    Alias(#[from] aliases::AliasError),
    /// The shell integration could not be installed
    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] shell::BootstrapError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A path needed for display could not be resolved
    #[error("Path resolution error: {0}")]
    PathResolution(String),
    /// The search command could not be started
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl RigError {
    /// Spawn failure for `command`
    #[must_use]
    pub fn spawn(command: &str, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.to_string(),
            source,
        }
    }
}
