//! Shared test utilities for E2E tests.
//!
//! The binary shells out to git, the environment's Python and docker. These
//! helpers build a scratch working directory and a `bin/` directory of
//! shell stubs that stand in for those tools. Every stub appends its command
//! line to `calls.log` so tests can check what was run.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_clone(MANIFEST).with_environment();
//! fixture.command().assert().success();
//! ```

#![cfg(unix)]

use assert_fs::prelude::*;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
    pub use super::MANIFEST;
}

/// A requirements manifest carrying the test include.
pub const MANIFEST: &str = "autobahn[serialization]\n-r requirements/testing.txt\nsqlalchemy>=1.4\n";

/// A scratch working directory plus stub tools.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture whose `docker` lists only the default networks.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        fs::create_dir_all(fixture.bin_dir()).expect("Failed to create bin directory");
        fixture.with_docker_networks(&["bridge", "host", "none"])
    }

    /// Pretend the repository was already cloned, with the given manifest.
    pub fn with_clone(self, manifest: &str) -> Self {
        self.temp_dir
            .child("ocs/requirements.txt")
            .write_str(manifest)
            .expect("Failed to write manifest");
        self
    }

    /// Pretend the virtual environment already exists.
    pub fn with_environment(self) -> Self {
        let python = self.path().join(".venv/bin/python");
        self.write_stub(&python, "python", "");
        self
    }

    /// A `docker` whose `network ls` prints the given names.
    pub fn with_docker_networks(self, networks: &[&str]) -> Self {
        let listing = networks.join("\\n");
        let body = format!("if [ \"$2\" = \"ls\" ]; then printf '{}\\n'; fi\n", listing);
        self.with_stub("docker", &body)
    }

    /// A `docker` that cannot reach its daemon.
    pub fn with_docker_down(self) -> Self {
        self.with_stub(
            "docker",
            "echo 'Cannot connect to the Docker daemon' >&2\nexit 1\n",
        )
    }

    /// A `git` that fails every clone.
    pub fn with_failing_git(self) -> Self {
        self.with_stub(
            "git",
            "echo 'fatal: repository not found' >&2\nexit 128\n",
        )
    }

    /// Put a stub named `name` on the fixture's `PATH`.
    pub fn with_stub(self, name: &str, body: &str) -> Self {
        let path = self.bin_dir().join(name);
        self.write_stub(&path, name, body);
        self
    }

    fn write_stub(&self, path: &Path, label: &str, body: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create stub directory");
        }
        let script = format!(
            "#!/bin/sh\necho \"{} $*\" >> '{}'\n{}",
            label,
            self.calls_log().display(),
            body
        );
        fs::write(path, script).expect("Failed to write stub");
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make stub executable");
    }

    /// Get the path to the working directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.temp_dir.path().join("bin")
    }

    pub fn calls_log(&self) -> PathBuf {
        self.temp_dir.path().join("calls.log")
    }

    /// Every stub invocation so far, one line each.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Get access to the underlying TempDir.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A command running in the fixture directory with the stubs on `PATH`.
    pub fn command(&self) -> assert_cmd::Command {
        let path = format!(
            "{}:{}",
            self.bin_dir().display(),
            env::var("PATH").unwrap_or_default()
        );
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ocs-quickstart");
        cmd.current_dir(self.path())
            .env("PATH", path)
            .args(["--hostname", "lab1"]);
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
