//! Command-line handling
//!
//! rig has no flags of its own: every argument belongs to ripgrep. This
//! module only inspects the arguments to decide how ripgrep is run.
//!
//! # Modes
//!
//! - **Bootstrap**: `RIG_BOOTSTRAP` is set; install the shell integration and exit
//! - **Help**: no arguments; ripgrep prints its usage
//! - **Pass-through**: an informational flag (`--help`, `--files`, ...) is present
//! - **Non-interactive**: stdin or stdout is not a terminal; ripgrep runs untouched
//! - **Aliases**: everything else; ripgrep runs with `--json` and rig prints the matches

use std::ffi::OsString;

/// Flags whose output is not a list of matches
pub const PASSTHROUGH_FLAGS: [&str; 5] =
    ["--version", "--help", "--files", "--stats", "--type-list"];

/// Arguments rig adds in alias mode, ahead of the user's
pub const JSON_ARGS: [&str; 2] = ["--json", "--no-stats"];

/// How this invocation runs ripgrep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Install the shell integration for the named shell
    Bootstrap(String),
    /// No arguments at all
    Help,
    /// An informational flag was given
    PassThrough {
        /// `--help` and `--version` also print rig's own version first
        print_version: bool,
    },
    /// Piped or redirected
    NonInteractive,
    /// Generate aliases
    Aliases,
}

/// The user's arguments, without the program name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<OsString>,
}

impl Invocation {
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments of the running process
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::args_os().skip(1))
    }

    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Index of the last occurrence of `option`
    #[must_use]
    pub fn option_index(&self, option: &str) -> Option<usize> {
        self.args.iter().rposition(|arg| arg == option)
    }

    /// The first informational flag present, in `PASSTHROUGH_FLAGS` order
    #[must_use]
    pub fn passthrough_flag(&self) -> Option<&'static str> {
        PASSTHROUGH_FLAGS
            .into_iter()
            .find(|flag| self.option_index(flag).is_some())
    }

    /// Whether the user asked ripgrep for `--color never`
    #[must_use]
    pub fn color_disabled(&self) -> bool {
        if self.option_index("--color=never").is_some() {
            return true;
        }
        self.option_index("--color")
            .and_then(|idx| self.args.get(idx + 1))
            .is_some_and(|value| value == "never")
    }

    /// Arguments for ripgrep in alias mode
    #[must_use]
    pub fn search_args(&self) -> Vec<OsString> {
        JSON_ARGS
            .iter()
            .map(OsString::from)
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Decide the mode
    ///
    /// `bootstrap` is the configured `RIG_BOOTSTRAP` shell; `interactive`
    /// tells whether both stdin and stdout are terminals.
    #[must_use]
    pub fn mode(&self, bootstrap: Option<&str>, interactive: bool) -> Mode {
        if let Some(shell) = bootstrap {
            return Mode::Bootstrap(shell.to_string());
        }
        if self.args.is_empty() {
            return Mode::Help;
        }
        if let Some(flag) = self.passthrough_flag() {
            return Mode::PassThrough {
                print_version: matches!(flag, "--help" | "--version"),
            };
        }
        if !interactive {
            return Mode::NonInteractive;
        }
        Mode::Aliases
    }
}
