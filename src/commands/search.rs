//! Search command - run ripgrep in JSON mode and turn every match into an alias

use super::passthrough::exit_code;
use crate::{
    RigError,
    aliases::AliasFile,
    cli::Invocation,
    config::RigConfig,
    decoder::{Event, EventStream},
    output,
};
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, RigError>;

/// Execute the search command
///
/// The alias file is written on every path out of the search, including
/// decode errors and ripgrep failures, so the shell never sources a
/// previous run's aliases.
///
/// # Errors
/// Returns an error if ripgrep cannot be started, its output is malformed,
/// the working directory is unknown, or the alias file cannot be written
pub fn execute(config: &RigConfig, invocation: &Invocation) -> Result<i32> {
    if invocation.color_disabled() {
        colored::control::set_override(false);
    }

    let mut aliases = AliasFile::new(config);
    let searched = run_search(config, &invocation.search_args(), &mut aliases);
    let finalized = aliases.finalize();

    let code = searched?;
    finalized?;
    Ok(code)
}

fn run_search(config: &RigConfig, args: &[OsString], aliases: &mut AliasFile) -> Result<i32> {
    let cwd = std::env::current_dir().map_err(|e| {
        RigError::PathResolution(format!("cannot determine working directory: {e}"))
    })?;

    debug!(command = %config.ripgrep_cmd, ?args, "spawning search");
    let mut child = Command::new(&config.ripgrep_cmd)
        .args(args)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|source| RigError::spawn(&config.ripgrep_cmd, source))?;

    let Some(stdout) = child.stdout.take() else {
        let _ = child.kill();
        return Err(RigError::Io(io::Error::other("search output was not captured")));
    };

    let processed = {
        let mut out = io::stdout().lock();
        process_events(
            EventStream::new(BufReader::new(stdout)),
            aliases,
            &mut out,
            &cwd,
        )
    };
    if processed.is_err() {
        let _ = child.kill();
    }

    let status = child.wait()?;
    processed?;

    debug!(aliases = aliases.latest(), ?status, "search finished");
    Ok(exit_code(status))
}

/// Consume decoded events, allocating an alias and printing a line per submatch
///
/// Only `match` and `context` records with submatches produce aliases.
/// Results are grouped under a header naming the file.
///
/// # Errors
/// Returns `RigError::Decode` on the first malformed record and
/// `RigError::Io` if writing to `out` fails
pub fn process_events<R: BufRead, W: Write>(
    mut events: EventStream<R>,
    aliases: &mut AliasFile,
    out: &mut W,
    cwd: &Path,
) -> Result<()> {
    let mut current_path: Option<PathBuf> = None;

    for event in &mut events {
        let event = event?;
        if let Event::Summary(summary) = &event {
            debug!(elapsed = ?summary.elapsed_total.as_duration(), "search summary");
        }
        let Some(data) = event.matched_line() else {
            continue;
        };
        let Some(path) = data.path.as_text() else {
            warn!(path = %data.path.to_lossy(), "skipping match in a file whose name is not UTF-8");
            continue;
        };

        let path = absolute_path(cwd, path);
        if current_path.as_ref() != Some(&path) {
            if current_path.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "{}", output::file_header(&path, cwd))?;
            current_path = Some(path.clone());
        }

        let text = data.lines.to_lossy();
        let line = data.line_number.unwrap_or(1);
        for submatch in &data.submatches {
            let handle = aliases.allocate(&path, line, submatch.start);
            writeln!(
                out,
                "{}",
                output::match_line(handle, &text, line, submatch.start, submatch.end)
            )?;
        }
    }

    debug!(lines = events.lines_read(), "search output consumed");
    Ok(())
}

/// `path` resolved against `cwd`, with `.` and `..` components folded away
fn absolute_path(cwd: &Path, path: &str) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in cwd.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}
