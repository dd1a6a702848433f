use std::path::Path;

use log::info;

use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};

/// What [`clone_repository`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    AlreadyPresent,
}

/// Clone `url` into `clone_dir` unless that path already exists.
///
/// This uses the system git command, so SSH keys, credential helpers and
/// anything else configured in ~/.gitconfig apply. Git's own progress is
/// streamed to the terminal. A failed clone is fatal and is not retried.
pub fn clone_repository(
    runner: &dyn CommandRunner,
    url: &str,
    clone_dir: &Path,
) -> Result<CloneOutcome> {
    info!("Starting repository cloning...");

    if clone_dir.exists() {
        info!(
            "Repository directory {} already exists.",
            clone_dir.display()
        );
        return Ok(CloneOutcome::AlreadyPresent);
    }

    let spec = CommandSpec::new("git").args([
        "clone".to_string(),
        url.to_string(),
        clone_dir.display().to_string(),
    ]);
    runner.run_checked(&spec)?;

    info!("Repository cloned to {}", clone_dir.display());
    Ok(CloneOutcome::Cloned)
}
