//! Alias file generation
//!
//! Every submatch gets the next handle (`1`, `2`, ...) and one alias line
//! that opens the editor on it. [`AliasFile::finalize`] adds the line that
//! defines `__rig-clear`, truncates and rewrites the alias file, and writes
//! the handle count to the `.count` file beside it.

mod editor;
mod error;

pub use editor::{EditorCommand, EditorSource, EditorWarning, EDITORS};
pub use error::AliasError;

use crate::config::RigConfig;
use crate::shell::ShellDialect;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Handle number of one alias; the first is 1
pub type Handle = u32;

/// In-memory alias file for one run
#[derive(Debug)]
pub struct AliasFile {
    path: PathBuf,
    count_path: PathBuf,
    prefix: String,
    dialect: ShellDialect,
    editor: EditorCommand,
    buf: String,
    latest: Handle,
}

impl AliasFile {
    /// Alias file described by `config`; editor warnings are logged
    #[must_use]
    pub fn new(config: &RigConfig) -> Self {
        let (editor, warnings) = EditorCommand::resolve(config);
        for warning in &warnings {
            warn!("{warning}");
        }
        Self::with_editor(config, editor)
    }

    #[must_use]
    pub fn with_editor(config: &RigConfig, editor: EditorCommand) -> Self {
        debug!(template = editor.template(), source = ?editor.source(), "editor resolved");
        Self {
            path: config.alias_file.clone(),
            count_path: config.count_file(),
            prefix: config.alias_prefix.clone(),
            dialect: config.dialect(),
            editor,
            buf: String::new(),
            latest: 0,
        }
    }

    /// Record an alias for the match at `line` (1-based) starting at byte
    /// `column_start` (0-based) of `path`, and return its handle
    pub fn allocate(&mut self, path: &Path, line: u64, column_start: u64) -> Handle {
        self.latest += 1;
        let command = self.editor.render(
            &path.to_string_lossy(),
            line,
            column_start.saturating_add(1),
            self.dialect,
        );
        let name = self.alias_name(self.latest);
        self.buf.push_str(&self.dialect.alias_definition(&name, &command));
        self.latest
    }

    /// The shell name of `handle`, e.g. `e3`
    #[must_use]
    pub fn alias_name(&self, handle: Handle) -> String {
        format!("{}{handle}", self.prefix)
    }

    /// The last handle handed out; 0 before the first
    #[must_use]
    pub const fn latest(&self) -> Handle {
        self.latest
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full alias file text: alias lines followed by the cleanup registration
    #[must_use]
    pub fn render(&self) -> String {
        let mut contents = self.buf.clone();
        contents.push_str(&self.dialect.cleanup_registration(&self.prefix, self.latest));
        contents
    }

    /// Overwrite the alias file and its count file
    ///
    /// # Errors
    ///
    /// Returns `AliasError::Write` if either file cannot be written.
    pub fn finalize(&self) -> Result<(), AliasError> {
        write_file(&self.path, self.render().as_bytes())?;
        write_file(&self.count_path, self.latest.to_string().as_bytes())?;
        debug!(path = %self.path.display(), aliases = self.latest, "alias file written");
        Ok(())
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), AliasError> {
    fs::write(path, contents).map_err(|source| AliasError::Write {
        path: path.to_path_buf(),
        source,
    })
}
