//! # OCS Quickstart Library
//!
//! This library provisions a local OCS (Observatory Control System) stack in
//! one pass. It is used by the `ocs-quickstart` command-line tool, which is a
//! thin wrapper around [`pipeline::run`].
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use ocs_quickstart::templates::{self, TemplateVars};
//!
//! let vars = TemplateVars::for_site("lab1", Path::new("/srv/ocs-site-configs"), "grafana/grafana:latest");
//! let site = templates::render(&templates::DEFAULT_SITE, &vars).unwrap();
//!
//! assert!(site.contains("log-dir: '/home/lab1/log/ocs/'"));
//! ```
//!
//! ## Provisioning Steps
//!
//! - **Repository fetch (`git`)**: Clone the OCS repository unless present.
//! - **Manifest patching (`requirements`)**: Toggle the test requirements
//!   include around the install.
//! - **Environment (`environment`, `platform`)**: Create a Python virtual
//!   environment and upgrade its pip.
//! - **Dependencies (`install`)**: Install the requirements and the cloned
//!   package into the environment.
//! - **Configuration (`templates`, `site_config`)**: Render the site
//!   configuration and compose files.
//! - **Network (`network`)**: Make sure the shared bridge network exists.
//! - **Helper scripts (`scripts`)**: Write `up.py` and `down.py`.
//!
//! External tools are driven through the [`process::CommandRunner`] trait
//! and every step receives its inputs from [`settings::Settings`].

pub mod environment;
pub mod error;
pub mod git;
pub mod install;
pub mod network;
pub mod pipeline;
pub mod platform;
pub mod process;
pub mod requirements;
pub mod scripts;
pub mod settings;
pub mod site_config;
pub mod templates;
