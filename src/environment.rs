//! Python virtual environment provisioning.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::platform::Platform;
use crate::process::{CommandRunner, CommandSpec};

/// Create the virtual environment if needed and upgrade its pip.
///
/// The environment is created with `<base_python> -m venv <dir>`, which
/// bundles pip. Whether or not it was just created, pip is then upgraded to
/// the latest release. Both steps are fatal on failure.
///
/// Returns the path of the environment's interpreter.
pub fn provision_environment(
    runner: &dyn CommandRunner,
    base_python: &str,
    environment_dir: &Path,
    platform: Platform,
) -> Result<PathBuf> {
    info!("Setting up virtual environment...");

    if environment_dir.exists() {
        info!(
            "Virtual environment already exists at {}",
            environment_dir.display()
        );
    } else {
        let create = CommandSpec::new(base_python).args([
            "-m".to_string(),
            "venv".to_string(),
            environment_dir.display().to_string(),
        ]);
        runner.run_checked(&create)?;
        info!(
            "Virtual environment created at {}",
            environment_dir.display()
        );
    }

    let python = platform.interpreter_path(environment_dir);

    let upgrade = CommandSpec::new(python.display().to_string())
        .args(["-m", "pip", "install", "--upgrade", "pip"]);
    runner.run_checked(&upgrade)?;
    info!("pip has been upgraded to the latest version.");

    Ok(python)
}
