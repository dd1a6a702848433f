//! CLI argument parsing and dispatch

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Parser;

use ocs_quickstart::network::NetworkStatus;
use ocs_quickstart::pipeline;
use ocs_quickstart::process::SystemRunner;
use ocs_quickstart::settings::{self, Settings};

/// OCS Quickstart - Provision a local OCS observatory control stack
#[derive(Parser, Debug)]
#[command(name = "ocs-quickstart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Grafana Docker image to use
    #[arg(long, value_name = "IMAGE", default_value = settings::DEFAULT_GRAFANA_IMAGE)]
    grafana_image: String,

    /// Hostname written into the site configuration (defaults to this machine's)
    #[arg(long, value_name = "NAME", value_parser = parse_hostname)]
    hostname: Option<String>,

    /// Directory to provision into (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Python interpreter used to create the virtual environment
    #[arg(long, value_name = "EXE")]
    python: Option<String>,

    /// Name of the Docker bridge network shared by the stack
    #[arg(long, value_name = "NAME", default_value = settings::DEFAULT_NETWORK_NAME)]
    network: String,

    /// Set log level
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = PossibleValuesParser::new(["off", "error", "warn", "info", "debug", "trace"])
    )]
    log_level: String,
}

impl Cli {
    /// Execute the provisioning run
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let hostname = match self.hostname {
            Some(hostname) => hostname,
            None => settings::detect_hostname()?,
        };
        let root = self.directory.unwrap_or_default();

        let mut settings = Settings::new(&root, hostname);
        settings.grafana_image = self.grafana_image;
        settings.network_name = self.network;
        if let Some(python) = self.python {
            settings.base_python = python;
        }

        let summary =
            pipeline::run(&settings, &SystemRunner).context("Provisioning did not complete")?;

        println!();
        println!(
            "Configuration written to {} ({} files)",
            settings.config_dir.display(),
            summary.config_files.len()
        );
        if let NetworkStatus::Unavailable { reason } = &summary.network {
            println!(
                "Network '{}' is not set up yet: {}",
                settings.network_name, reason
            );
            println!(
                "Create it with: {} network create --driver bridge {}",
                settings.container_engine, settings.network_name
            );
        }
        println!(
            "Start the stack with: cd {} && python up.py",
            settings.config_dir.display()
        );

        Ok(())
    }
}

fn parse_hostname(value: &str) -> std::result::Result<String, String> {
    settings::check_hostname(value.to_string()).map_err(|e| e.to_string())
}

/// Console logging as `<timestamp> - <LEVEL> - <message>`.
fn init_logging(level: &str) {
    env_logger::Builder::new()
        .parse_filters(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();
}
