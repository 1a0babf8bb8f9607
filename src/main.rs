//! rig CLI application entry point
//!
//! rig stands in for `rg`. Every argument goes to ripgrep; rig decides how
//! ripgrep runs and, when attached to a terminal, numbers each match and
//! writes a shell alias that opens the editor at it.
//!
//! # Usage
//!
//! ```bash
//! # Install the shell integration once
//! RIG_BOOTSTRAP=$SHELL rig
//!
//! # Search, then jump to the third match
//! rg TODO src/
//! e3
//!
//! # Piped output and informational flags are passed through untouched
//! rg TODO | wc -l
//! rg --files
//! ```
//!
//! # Configuration
//!
//! Settings come from `RIG_*` environment variables, optionally preceded by
//! `~/.config/rig/config.toml` on Linux.

use colored::Colorize;
use rig::{
    RigError,
    cli::{Invocation, Mode},
    commands,
    config::{self, RigConfig},
    version,
};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::{Level, debug, warn};

type Result<T> = std::result::Result<T, RigError>;

fn init_logging(config: &RigConfig) {
    let level = config.log_level();

    tracing_subscriber::fmt()
        .with_max_level(level.unwrap_or(Level::WARN))
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();

    if level.is_none() {
        warn!(value = %config.log, "ignoring invalid {}", config::LOG_ENV);
    }
}

fn run(config: &RigConfig) -> Result<i32> {
    let invocation = Invocation::from_env();
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    let mode = invocation.mode(config.bootstrap.as_deref(), interactive);
    debug!(?mode, "dispatching");

    match mode {
        Mode::Bootstrap(shell) => commands::bootstrap(&shell),
        Mode::PassThrough { print_version } => {
            if print_version {
                println!("{}", version::version_string());
            }
            commands::passthrough(&config.ripgrep_cmd, invocation.args())
        }
        Mode::Help | Mode::NonInteractive => {
            commands::passthrough(&config.ripgrep_cmd, invocation.args())
        }
        Mode::Aliases => commands::search(config, &invocation),
    }
}

fn main() -> ExitCode {
    let config = match RigConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), RigError::from(e));
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match run(&config) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
