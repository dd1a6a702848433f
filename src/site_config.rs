//! # Site Configuration Tree
//!
//! Writes the configuration tree consumed by the container stack:
//!
//! ```text
//! <root>/default.yaml
//! <root>/docker-compose.yaml
//! <root>/grafana/docker-compose.yaml
//! <root>/influxdb/docker-compose.yaml
//! <root>/crossbar/docker-compose.yaml
//! ```
//!
//! Files are overwritten on every run. `{config_directory}` is the absolute
//! path of the directory each file is written into, so it differs between
//! the root and the component subdirectories.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::templates::{self, Template, TemplateVars};

pub const SITE_CONFIG_FILE: &str = "default.yaml";
pub const COMPOSE_FILE: &str = "docker-compose.yaml";

/// Component subdirectories, each holding its own compose file.
pub const GRAFANA_DIR: &str = "grafana";
pub const INFLUXDB_DIR: &str = "influxdb";
pub const CROSSBAR_DIR: &str = "crossbar";

/// One file of the tree: subdirectory (`None` for the root), file name, and
/// the template it is rendered from.
struct ConfigFile {
    subdir: Option<&'static str>,
    file_name: &'static str,
    template: Template,
}

const CONFIG_FILES: [ConfigFile; 5] = [
    ConfigFile {
        subdir: None,
        file_name: SITE_CONFIG_FILE,
        template: templates::DEFAULT_SITE,
    },
    ConfigFile {
        subdir: None,
        file_name: COMPOSE_FILE,
        template: templates::COMPONENTS_COMPOSE,
    },
    ConfigFile {
        subdir: Some(GRAFANA_DIR),
        file_name: COMPOSE_FILE,
        template: templates::GRAFANA_COMPOSE,
    },
    ConfigFile {
        subdir: Some(INFLUXDB_DIR),
        file_name: COMPOSE_FILE,
        template: templates::INFLUXDB_COMPOSE,
    },
    ConfigFile {
        subdir: Some(CROSSBAR_DIR),
        file_name: COMPOSE_FILE,
        template: templates::CROSSBAR_COMPOSE,
    },
];

/// Create the configuration tree under `config_dir` and render every file.
///
/// Returns the paths written, in write order.
pub fn setup_configurations(
    config_dir: &Path,
    hostname: &str,
    grafana_image: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(CONFIG_FILES.len());

    for file in &CONFIG_FILES {
        let directory = match file.subdir {
            Some(subdir) => config_dir.join(subdir),
            None => config_dir.to_path_buf(),
        };
        fs::create_dir_all(&directory)?;

        written.push(write_config_file(
            &directory,
            file.file_name,
            &file.template,
            hostname,
            grafana_image,
        )?);
    }

    Ok(written)
}

/// Render one template into `directory/file_name`.
pub fn write_config_file(
    directory: &Path,
    file_name: &str,
    template: &Template,
    hostname: &str,
    grafana_image: &str,
) -> Result<PathBuf> {
    let absolute = std::path::absolute(directory)?;
    let vars = TemplateVars::for_site(hostname, &absolute, grafana_image);
    let content = templates::render(template, &vars)?;

    let path = directory.join(file_name);
    fs::write(&path, content)?;
    info!("YAML file {} created in {}.", file_name, directory.display());

    Ok(path)
}
