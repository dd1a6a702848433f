//! Orchestrator for the complete provisioning run
//!
//! Runs every step in order against one [`Settings`]:
//! 1. Clone the OCS repository (if absent)
//! 2. Comment out the self-referencing test requirements include
//! 3. Create the virtual environment and upgrade pip
//! 4. Install the requirements and the cloned package
//! 5. Restore the requirements include
//! 6. Render the configuration tree
//! 7. Ensure the container network exists
//! 8. Write the up/down helper scripts
//!
//! Each step is idempotent, so an interrupted run is resumed by running
//! again.

use std::path::PathBuf;

use log::{error, info};

use crate::environment;
use crate::error::Result;
use crate::git::{self, CloneOutcome};
use crate::install::{self, InstallOutcome};
use crate::network::{self, NetworkStatus};
use crate::process::CommandRunner;
use crate::requirements::{self, PatchDirection};
use crate::scripts;
use crate::settings::Settings;
use crate::site_config;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub clone: CloneOutcome,
    pub python: PathBuf,
    pub install: InstallOutcome,
    pub config_files: Vec<PathBuf>,
    pub network: NetworkStatus,
    pub scripts: Vec<PathBuf>,
}

/// Execute the complete provisioning run.
pub fn run(settings: &Settings, runner: &dyn CommandRunner) -> Result<Summary> {
    let clone = git::clone_repository(runner, &settings.repo_url, &settings.clone_dir)?;

    requirements::patch_requirements(&settings.requirements_file, PatchDirection::Disable)?;
    let installed = environment::provision_environment(
        runner,
        &settings.base_python,
        &settings.environment_dir,
        settings.platform,
    )
    .and_then(|python| {
        install::install_requirements(
            runner,
            &python,
            &settings.requirements_file,
            &settings.clone_dir,
        )
        .map(|outcome| (python, outcome))
    });
    // The include is restored even when the install failed.
    let restored =
        requirements::patch_requirements(&settings.requirements_file, PatchDirection::Restore);
    let (python, install) = match (installed, restored) {
        (Err(install_error), Err(restore_error)) => {
            error!(
                "Could not restore requirements file '{}': {}",
                settings.requirements_file.display(),
                restore_error
            );
            return Err(install_error);
        }
        (installed, restored) => {
            restored?;
            installed?
        }
    };

    let config_files = site_config::setup_configurations(
        &settings.config_dir,
        &settings.hostname,
        &settings.grafana_image,
    )?;

    let network =
        network::ensure_network(runner, &settings.container_engine, &settings.network_name);

    let scripts = scripts::write_helper_scripts(&settings.config_dir)?;

    info!("Provisioning finished.");

    Ok(Summary {
        clone,
        python,
        install,
        config_files,
        network,
        scripts,
    })
}
