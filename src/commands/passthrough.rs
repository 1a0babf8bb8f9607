//! Pass-through command - run ripgrep untouched

use crate::RigError;
use std::ffi::OsStr;
use std::process::{Command, ExitStatus};
use tracing::debug;

type Result<T> = std::result::Result<T, RigError>;

/// Run `ripgrep_cmd` with `args`, sharing this process's stdin, stdout and stderr
///
/// Returns ripgrep's exit code.
///
/// # Errors
/// Returns `RigError::Spawn` if ripgrep cannot be started
pub fn execute<S: AsRef<OsStr>>(ripgrep_cmd: &str, args: &[S]) -> Result<i32> {
    debug!(command = ripgrep_cmd, "passing through");
    let status = Command::new(ripgrep_cmd)
        .args(args)
        .status()
        .map_err(|source| RigError::spawn(ripgrep_cmd, source))?;
    Ok(exit_code(status))
}

/// The code to exit with after a child finished with `status`
///
/// A child killed by a signal maps to `128 + signal`, as shells report it.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
