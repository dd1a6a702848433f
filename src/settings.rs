//! Run settings and their default values.
//!
//! Every value the provisioning steps need is carried here explicitly and
//! passed down, rather than read from globals. Relative locations are
//! resolved against a single working root.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::platform::Platform;

/// Repository that provides the OCS Python package.
pub const DEFAULT_REPO_URL: &str = "https://github.com/simonsobs/ocs.git";

/// Directory the repository is cloned into.
pub const DEFAULT_CLONE_DIR: &str = "ocs";

/// Dependency manifest, relative to the clone directory.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Directory of the Python virtual environment.
pub const DEFAULT_ENVIRONMENT_DIR: &str = ".venv";

/// Root of the generated configuration tree.
pub const DEFAULT_CONFIG_DIR: &str = "ocs-site-configs";

/// Bridge network shared by all compose files.
pub const DEFAULT_NETWORK_NAME: &str = "ocs-net";

/// Container engine CLI.
pub const DEFAULT_CONTAINER_ENGINE: &str = "docker";

/// Grafana image used unless overridden on the command line.
pub const DEFAULT_GRAFANA_IMAGE: &str = "grafana/grafana:latest";

/// Everything a provisioning run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repo_url: String,
    pub clone_dir: PathBuf,
    pub requirements_file: PathBuf,
    pub environment_dir: PathBuf,
    pub config_dir: PathBuf,
    pub network_name: String,
    pub container_engine: String,
    /// Interpreter used to create the virtual environment.
    pub base_python: String,
    pub hostname: String,
    pub grafana_image: String,
    pub platform: Platform,
}

impl Settings {
    /// Default settings with every location placed under `root`.
    pub fn new(root: &Path, hostname: impl Into<String>) -> Self {
        let platform = Platform::current();
        let clone_dir = root.join(DEFAULT_CLONE_DIR);

        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            requirements_file: clone_dir.join(REQUIREMENTS_FILE),
            clone_dir,
            environment_dir: root.join(DEFAULT_ENVIRONMENT_DIR),
            config_dir: root.join(DEFAULT_CONFIG_DIR),
            network_name: DEFAULT_NETWORK_NAME.to_string(),
            container_engine: DEFAULT_CONTAINER_ENGINE.to_string(),
            base_python: platform.default_python().to_string(),
            hostname: hostname.into(),
            grafana_image: DEFAULT_GRAFANA_IMAGE.to_string(),
            platform,
        }
    }
}

/// Ask the operating system for this machine's hostname.
pub fn detect_hostname() -> Result<String> {
    let name = gethostname::gethostname();
    let name = name.into_string().map_err(|raw| Error::Hostname {
        message: format!("hostname is not valid UTF-8: {:?}", raw),
    })?;

    check_hostname(name)
}

/// Reject a hostname that is empty or only whitespace.
pub fn check_hostname(name: String) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::Hostname {
            message: "hostname is empty".to_string(),
        });
    }
    Ok(name)
}
