//! Bootstrap command - install the shell integration into a startup file

use crate::{
    RigError,
    shell::{BootstrapOutcome, ShellBootstrapper, StartupFileBootstrapper},
};
use colored::Colorize;
use tracing::info;

type Result<T> = std::result::Result<T, RigError>;

/// Execute the bootstrap command for the shell at `shell`
///
/// # Errors
/// Returns an error if the shell is not supported or its startup file
/// cannot be written
pub fn execute(shell: &str) -> Result<i32> {
    let bootstrapper = StartupFileBootstrapper::for_shell(shell)?;
    info!(dialect = %bootstrapper.dialect(), "bootstrapping shell integration");

    let outcome = install(&bootstrapper)?;
    println!("{}", describe(&outcome));
    Ok(0)
}

/// Install through any bootstrapper
///
/// # Errors
/// Returns `RigError::Bootstrap` if the startup file cannot be read or written
pub fn install(bootstrapper: &impl ShellBootstrapper) -> Result<BootstrapOutcome> {
    Ok(bootstrapper.bootstrap()?)
}

/// The line reported to the user for `outcome`
#[must_use]
pub fn describe(outcome: &BootstrapOutcome) -> String {
    match outcome {
        BootstrapOutcome::Installed(path) => format!(
            "{} rig shell integration installed into {}",
            "✓".green(),
            path.display()
        ),
        BootstrapOutcome::AlreadyInstalled(path) => {
            format!("rig shell integration already installed in {}", path.display())
        }
    }
}
