//! Dependency installation into the virtual environment.

use std::path::Path;

use log::{error, info};

use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};

/// What [`install_requirements`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// The manifest was missing, so nothing was installed.
    Skipped,
}

/// Install the manifest plus the cloned repository as a local package.
///
/// Runs `<python> -m pip install -r <manifest> <clone_dir>/.`. A missing
/// manifest is logged and skipped; a failing pip is fatal.
pub fn install_requirements(
    runner: &dyn CommandRunner,
    python: &Path,
    requirements_file: &Path,
    clone_dir: &Path,
) -> Result<InstallOutcome> {
    info!("Installing requirements...");

    if !requirements_file.exists() {
        error!(
            "Requirements file '{}' not found.",
            requirements_file.display()
        );
        return Ok(InstallOutcome::Skipped);
    }

    let spec = CommandSpec::new(python.display().to_string()).args([
        "-m".to_string(),
        "pip".to_string(),
        "install".to_string(),
        "-r".to_string(),
        requirements_file.display().to_string(),
        format!("{}/.", clone_dir.display()),
    ]);
    runner.run_checked(&spec)?;

    info!("Requirements installed.");
    Ok(InstallOutcome::Installed)
}
