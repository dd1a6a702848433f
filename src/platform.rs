//! Platform-dependent layout of Python virtual environments.

use std::path::{Path, PathBuf};

/// The two environment layouts a virtual environment can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Path of the interpreter inside a virtual environment.
    ///
    /// - Windows: `<env>\Scripts\python.exe`
    /// - Everything else: `<env>/bin/python`
    pub fn interpreter_path(self, environment_dir: &Path) -> PathBuf {
        match self {
            Platform::Windows => environment_dir.join("Scripts").join("python.exe"),
            Platform::Unix => environment_dir.join("bin").join("python"),
        }
    }

    /// Interpreter name used to create new environments when none is given.
    pub fn default_python(self) -> &'static str {
        match self {
            Platform::Windows => "python",
            Platform::Unix => "python3",
        }
    }
}
