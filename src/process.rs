//! # Child Process Invocation
//!
//! Every external collaborator (git, the Python interpreter, the container
//! engine) is driven through the [`CommandRunner`] trait. A run produces a
//! [`CommandOutput`] carrying the exit code and any captured output; turning
//! a non-zero exit into an error is an explicit call to
//! [`CommandOutput::check`], so each step decides for itself whether a
//! failure is fatal or only worth logging.
//!
//! The trait exists so tests can swap in a recording runner instead of
//! spawning real processes. The application uses [`SystemRunner`], which
//! wraps `std::process::Command`. No timeouts are applied: a hung tool hangs
//! the run.

use std::fmt;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// A single external command: program, arguments, and whether its output
/// should be captured or streamed to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Capture stdout/stderr instead of inheriting the parent's streams.
    pub capture: bool,
}

impl CommandSpec {
    /// Create a command that streams its output to the terminal.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture: false,
        }
    }

    /// Append arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Capture stdout and stderr into the resulting [`CommandOutput`].
    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The result of running a command to completion.
///
/// `stdout` and `stderr` are empty unless the command was captured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Convert an unsuccessful exit into [`Error::CommandFailed`].
    pub fn check(self, spec: &CommandSpec) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::CommandFailed {
                command: spec.to_string(),
                code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }

    /// A successful output with the given stdout.
    #[cfg(test)]
    pub fn ok(stdout: &str) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and stderr.
    #[cfg(test)]
    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through [`CommandOutput::exit_code`].
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Run a command and fail on a non-zero exit.
    fn run_checked(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.run(spec)?.check(spec)
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!("Running: {}", spec);

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);

        let spawn_error = |e: std::io::Error| Error::Spawn {
            program: spec.program.clone(),
            message: e.to_string(),
        };

        if spec.capture {
            let output = command.output().map_err(spawn_error)?;
            Ok(CommandOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let status = command.status().map_err(spawn_error)?;
            Ok(CommandOutput {
                exit_code: status.code(),
                ..CommandOutput::default()
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync>;

    /// Records every command and answers with a caller-supplied responder.
    pub(crate) struct MockRunner {
        calls: Mutex<Vec<CommandSpec>>,
        responder: Responder,
    }

    impl MockRunner {
        /// Every command succeeds with empty output.
        pub(crate) fn succeeding() -> Self {
            Self::with_responder(|_| Ok(CommandOutput::ok("")))
        }

        pub(crate) fn with_responder<F>(responder: F) -> Self
        where
            F: Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync + 'static,
        {
            Self {
                calls: Mutex::new(Vec::new()),
                responder: Box::new(responder),
            }
        }

        pub(crate) fn calls(&self) -> Vec<CommandSpec> {
            self.calls.lock().unwrap().clone()
        }

        /// The recorded commands rendered as single lines.
        pub(crate) fn command_lines(&self) -> Vec<String> {
            self.calls().iter().map(ToString::to_string).collect()
        }
    }

    impl CommandRunner for MockRunner {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
            self.calls.lock().unwrap().push(spec.clone());
            (self.responder)(spec)
        }
    }
}
