//! Shell integration
//!
//! rig cannot define aliases in its parent shell by itself. Instead a small
//! pair of shell functions is appended once to the user's startup file:
//!
//! - `rg` clears the previous run's aliases, runs rig, then sources the new alias file
//! - `__rig-clear` removes as many aliases as the `.count` file next to the alias file records
//!
//! The appended block is bracketed by marker comments. Finding the begin
//! marker anywhere in the file means the block is installed, so installing
//! twice is a no-op.

mod dialect;
mod error;
pub mod templates;

pub use dialect::ShellDialect;
pub use error::BootstrapError;

use crate::config;
use crate::template;
use std::cell::OnceCell;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What `bootstrap` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The block was appended to the startup file
    Installed(PathBuf),
    /// The startup file already carried the block; nothing was written
    AlreadyInstalled(PathBuf),
}

/// Capabilities every supported shell provides
pub trait ShellBootstrapper {
    /// Location of the startup file, resolved once per bootstrapper
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::NoHomeDirectory` if the home directory is unknown.
    fn startup_file(&self) -> Result<&Path, BootstrapError>;

    /// Whether the startup file already contains the begin marker
    ///
    /// A missing startup file counts as not installed.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError` if the file exists but cannot be read.
    fn is_bootstrapped(&self) -> Result<bool, BootstrapError>;

    /// Append the integration block unless it is already present
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError` if the startup file or its parent directories
    /// cannot be created or written.
    fn bootstrap(&self) -> Result<BootstrapOutcome, BootstrapError>;
}

/// Bootstrapper that appends a dialect-specific block to a startup file
#[derive(Debug)]
pub struct StartupFileBootstrapper {
    dialect: ShellDialect,
    startup_file: OnceCell<PathBuf>,
}

impl StartupFileBootstrapper {
    #[must_use]
    pub const fn new(dialect: ShellDialect) -> Self {
        Self {
            dialect,
            startup_file: OnceCell::new(),
        }
    }

    /// Bootstrapper for the shell at `shell` (matched by base name)
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError::UnsupportedShell` for anything but bash, zsh or fish.
    pub fn for_shell(shell: &str) -> Result<Self, BootstrapError> {
        ShellDialect::from_shell_path(shell)
            .map(Self::new)
            .ok_or_else(|| BootstrapError::UnsupportedShell(shell.to_string()))
    }

    /// Bootstrapper writing to an explicit file instead of the dialect default
    #[must_use]
    pub fn with_startup_file(dialect: ShellDialect, path: impl Into<PathBuf>) -> Self {
        Self {
            dialect,
            startup_file: OnceCell::from(path.into()),
        }
    }

    #[must_use]
    pub const fn dialect(&self) -> ShellDialect {
        self.dialect
    }
}

impl ShellBootstrapper for StartupFileBootstrapper {
    fn startup_file(&self) -> Result<&Path, BootstrapError> {
        if let Some(path) = self.startup_file.get() {
            return Ok(path.as_path());
        }
        let home = dirs::home_dir().ok_or(BootstrapError::NoHomeDirectory)?;
        Ok(self
            .startup_file
            .get_or_init(|| self.dialect.startup_file(&home))
            .as_path())
    }

    fn is_bootstrapped(&self) -> Result<bool, BootstrapError> {
        let path = self.startup_file()?;
        match fs::read(path) {
            Ok(contents) => Ok(contains_marker(&contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BootstrapError::io(path, e)),
        }
    }

    fn bootstrap(&self) -> Result<BootstrapOutcome, BootstrapError> {
        let path = self.startup_file()?;
        if self.is_bootstrapped()? {
            return Ok(BootstrapOutcome::AlreadyInstalled(path.to_path_buf()));
        }

        let block = render_block(self.dialect);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BootstrapError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| BootstrapError::io(path, e))?;
        file.write_all(block.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| BootstrapError::io(path, e))?;

        Ok(BootstrapOutcome::Installed(path.to_path_buf()))
    }
}

/// The full marker-bracketed block for `dialect`
#[must_use]
pub fn render_block(dialect: ShellDialect) -> String {
    let body = template::render(
        dialect.bootstrap_template(),
        &[
            ("shell", dialect.name()),
            ("shell_env", config::SHELL_ENV),
            ("alias_file_env", config::ALIAS_FILE_ENV),
            ("alias_file_default", config::ALIAS_FILE_DEFAULT),
            ("alias_prefix_env", config::ALIAS_PREFIX_ENV),
            ("alias_prefix_default", config::ALIAS_PREFIX_DEFAULT),
        ],
    );
    format!("{}{body}{}", templates::BEGIN_MARKER, templates::END_MARKER)
}

fn contains_marker(contents: &[u8]) -> bool {
    let marker = templates::BEGIN_MARKER_TEXT.as_bytes();
    contents
        .split(|&b| b == b'\n')
        .any(|line| line.windows(marker.len()).any(|window| window == marker))
}
