//! # Container Network
//!
//! All compose files attach to one external bridge network so that services
//! in separate compose projects can reach each other by service name. This
//! module makes sure the network exists.
//!
//! Nothing here is fatal: when the container engine is missing or not
//! running the problem is logged and the run carries on, leaving the network
//! to be created later.

use log::{error, info};

use crate::error::Error;
use crate::process::{CommandRunner, CommandSpec};

const ENGINE_HINT: &str = "Is Docker running?";

/// What [`ensure_network`] found or did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkStatus {
    Created,
    AlreadyExists,
    /// The engine could not be queried or the network could not be created.
    Unavailable { reason: String },
}

/// Create the bridge network `name` unless the engine already has it.
pub fn ensure_network(runner: &dyn CommandRunner, engine: &str, name: &str) -> NetworkStatus {
    info!("Setting up Docker network...");

    let existing = match list_networks(runner, engine) {
        Ok(names) => names,
        Err(reason) => return unavailable(reason),
    };

    if existing.iter().any(|n| n == name) {
        info!("Docker network '{}' already exists.", name);
        return NetworkStatus::AlreadyExists;
    }

    let create = CommandSpec::new(engine)
        .args(["network", "create", "--driver", "bridge", name])
        .captured();
    match runner.run_checked(&create) {
        Ok(_) => {
            info!("Docker network '{}' successfully created.", name);
            NetworkStatus::Created
        }
        Err(e) => unavailable(failure_reason(e)),
    }
}

/// Names of the engine's existing networks, one per line of output.
fn list_networks(runner: &dyn CommandRunner, engine: &str) -> Result<Vec<String>, String> {
    let list = CommandSpec::new(engine)
        .args(["network", "ls", "--format", "{{.Name}}"])
        .captured();
    let output = runner.run_checked(&list).map_err(failure_reason)?;

    Ok(output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn failure_reason(error: Error) -> String {
    match error {
        Error::CommandFailed { stderr, .. } if !stderr.is_empty() => stderr,
        Error::CommandFailed { .. } => ENGINE_HINT.to_string(),
        other => format!("{} {}", other, ENGINE_HINT),
    }
}

fn unavailable(reason: String) -> NetworkStatus {
    error!(
        "Failed to list or create Docker network. Error: {}",
        reason
    );
    NetworkStatus::Unavailable { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockRunner;
    use crate::process::CommandOutput;

    fn engine_with_networks(networks: &'static str) -> MockRunner {
        MockRunner::with_responder(move |spec| {
            if spec.args.get(1).map(String::as_str) == Some("ls") {
                Ok(CommandOutput::ok(networks))
            } else {
                Ok(CommandOutput::ok(""))
            }
        })
    }

    fn create_calls(runner: &MockRunner) -> usize {
        runner
            .calls()
            .iter()
            .filter(|c| c.args.get(1).map(String::as_str) == Some("create"))
            .count()
    }

    #[test]
    fn test_creates_missing_network_once() {
        let runner = engine_with_networks("bridge\nhost\n");

        let status = ensure_network(&runner, "docker", "ocs-net");

        assert_eq!(status, NetworkStatus::Created);
        assert_eq!(create_calls(&runner), 1);
        assert_eq!(
            runner.command_lines(),
            vec![
                "docker network ls --format {{.Name}}".to_string(),
                "docker network create --driver bridge ocs-net".to_string(),
            ]
        );
    }

    #[test]
    fn test_existing_network_is_left_alone() {
        let runner = engine_with_networks("bridge\nhost\nocs-net\nnone\n");

        let status = ensure_network(&runner, "docker", "ocs-net");

        assert_eq!(status, NetworkStatus::AlreadyExists);
        assert_eq!(create_calls(&runner), 0);
    }

    #[test]
    fn test_name_must_match_whole_line() {
        let runner = engine_with_networks("ocs-net-old\nmy-ocs-net\n");

        let status = ensure_network(&runner, "docker", "ocs-net");

        assert_eq!(status, NetworkStatus::Created);
    }

    #[test]
    fn test_list_failure_is_logged_not_fatal() {
        testing_logger::setup();
        let runner = MockRunner::with_responder(|_| {
            Ok(CommandOutput::failed(
                1,
                "Cannot connect to the Docker daemon at unix:///var/run/docker.sock.\n",
            ))
        });

        let status = ensure_network(&runner, "docker", "ocs-net");

        assert_eq!(
            status,
            NetworkStatus::Unavailable {
                reason: "Cannot connect to the Docker daemon at unix:///var/run/docker.sock."
                    .to_string()
            }
        );
        assert_eq!(runner.calls().len(), 1);
        testing_logger::validate(|captured| {
            let errors: Vec<_> = captured
                .iter()
                .filter(|l| l.level == log::Level::Error)
                .collect();
            assert_eq!(errors.len(), 1);
            assert!(errors[0].body.contains("Cannot connect to the Docker daemon"));
        });
    }

    #[test]
    fn test_silent_failure_uses_hint() {
        let runner = MockRunner::with_responder(|_| Ok(CommandOutput::failed(1, "")));

        let status = ensure_network(&runner, "docker", "ocs-net");

        assert_eq!(
            status,
            NetworkStatus::Unavailable {
                reason: "Is Docker running?".to_string()
            }
        );
    }

    #[test]
    fn test_missing_engine_is_not_fatal() {
        let runner = MockRunner::with_responder(|spec| {
            Err(Error::Spawn {
                program: spec.program.clone(),
                message: "No such file or directory".to_string(),
            })
        });

        match ensure_network(&runner, "docker", "ocs-net") {
            NetworkStatus::Unavailable { reason } => {
                assert!(reason.contains("No such file or directory"));
                assert!(reason.contains("Is Docker running?"));
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn test_create_failure_is_not_fatal() {
        let runner = MockRunner::with_responder(|spec| {
            if spec.args.get(1).map(String::as_str) == Some("ls") {
                Ok(CommandOutput::ok("bridge\n"))
            } else {
                Ok(CommandOutput::failed(1, "permission denied"))
            }
        });

        let status = ensure_network(&runner, "docker", "ocs-net");

        assert_eq!(
            status,
            NetworkStatus::Unavailable {
                reason: "permission denied".to_string()
            }
        );
    }
}
