//! # Helper Scripts
//!
//! Two small Python scripts are written into the configuration root to bring
//! the stack up and down. Each walks the compose files in a fixed order,
//! root first, and stops at the first failing compose invocation. They pick
//! `docker-compose` on Windows and `docker compose` elsewhere at run time.
//!
//! The bodies are written verbatim; nothing in them is templated.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

const UP_SCRIPT: &str = r#"#!/usr/bin/env python3
import platform
import subprocess

DIRECTORIES = ("ocs-site-configs", "influxdb", "crossbar", "grafana")
COMPOSE_FILENAME = "docker-compose.yaml"


def get_docker_compose_command():
    return ["docker-compose"] if platform.system() == "Windows" else ["docker", "compose"]


def compose_file_for(directory):
    if directory == "ocs-site-configs":
        return COMPOSE_FILENAME
    return f"./{directory}/{COMPOSE_FILENAME}"


def bring_up_services():
    docker_compose_cmd = get_docker_compose_command()

    for directory in DIRECTORIES:
        print(f"Starting services in {directory}...")
        command = [*docker_compose_cmd, "-f", compose_file_for(directory), "up", "-d"]
        subprocess.run(command, check=True)


if __name__ == "__main__":
    bring_up_services()
"#;

const DOWN_SCRIPT: &str = r#"#!/usr/bin/env python3
import platform
import subprocess

DIRECTORIES = ("ocs-site-configs", "influxdb", "crossbar", "grafana")
COMPOSE_FILENAME = "docker-compose.yaml"


def get_docker_compose_command():
    return ["docker-compose"] if platform.system() == "Windows" else ["docker", "compose"]


def compose_file_for(directory):
    if directory == "ocs-site-configs":
        return COMPOSE_FILENAME
    return f"./{directory}/{COMPOSE_FILENAME}"


def take_down_services():
    docker_compose_cmd = get_docker_compose_command()

    for directory in DIRECTORIES:
        print(f"Stopping services in {directory}...")
        command = [*docker_compose_cmd, "-f", compose_file_for(directory), "down"]

        if directory == "crossbar":
            command.append("-v")

        subprocess.run(command, check=True)


if __name__ == "__main__":
    take_down_services()
"#;

/// Script file name and body, in write order.
pub const HELPER_SCRIPTS: [(&str, &str); 2] = [("up.py", UP_SCRIPT), ("down.py", DOWN_SCRIPT)];

/// Write every helper script into `directory`, replacing existing files.
///
/// On Unix the scripts are made executable.
pub fn write_helper_scripts(directory: &Path) -> Result<Vec<PathBuf>> {
    info!("Creating up/down scripts...");

    let mut written = Vec::with_capacity(HELPER_SCRIPTS.len());
    for (name, body) in HELPER_SCRIPTS {
        let path = directory.join(name);
        fs::write(&path, body)?;
        make_executable(&path)?;
        info!("Script {} created at {}", name, path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
