//! # Requirements Manifest Patching
//!
//! The OCS `requirements.txt` pulls in its own test requirements through a
//! `-r requirements/testing.txt` include, which cannot be resolved while the
//! package itself is being installed from outside the clone. The include is
//! commented out before the install and restored afterwards.
//!
//! Matching is exact on the line content without its line terminator. A line
//! with extra whitespace, or a comment spelled differently from `# `, is left
//! alone. Forward then reverse patching restores the original bytes.

use std::fs;
use std::path::Path;

use log::{error, info};

use crate::error::Result;

/// The include directive that is toggled.
pub const TESTING_INCLUDE: &str = "-r requirements/testing.txt";

const COMMENT_PREFIX: &str = "# ";

/// Which way to patch the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchDirection {
    /// Comment the include out.
    Disable,
    /// Restore a previously commented include.
    Restore,
}

/// What [`patch_requirements`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The manifest does not exist; nothing was done.
    Missing,
    /// The manifest was processed; `lines_changed` lines were rewritten.
    Patched { lines_changed: usize },
}

/// Rewrite `text` line by line, toggling the testing include.
pub fn patch_text(text: &str, direction: PatchDirection) -> (String, usize) {
    let commented = format!("{}{}", COMMENT_PREFIX, TESTING_INCLUDE);
    let mut patched = String::with_capacity(text.len() + COMMENT_PREFIX.len());
    let mut changed = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches('\n').trim_end_matches('\r');

        match direction {
            PatchDirection::Disable if content == TESTING_INCLUDE => {
                patched.push_str(COMMENT_PREFIX);
                patched.push_str(line);
                changed += 1;
            }
            PatchDirection::Restore if content == commented => {
                patched.push_str(&line[COMMENT_PREFIX.len()..]);
                changed += 1;
            }
            _ => patched.push_str(line),
        }
    }

    (patched, changed)
}

/// Patch the manifest at `path` in place.
///
/// A missing manifest is logged and reported as [`PatchOutcome::Missing`];
/// it does not fail the run. The file is only rewritten when a line changed.
pub fn patch_requirements(path: &Path, direction: PatchDirection) -> Result<PatchOutcome> {
    info!("Handling requirements file...");

    if !path.exists() {
        error!("Requirements file '{}' does not exist.", path.display());
        return Ok(PatchOutcome::Missing);
    }

    let original = fs::read_to_string(path)?;
    let (patched, lines_changed) = patch_text(&original, direction);

    if lines_changed > 0 {
        fs::write(path, patched)?;
    }

    Ok(PatchOutcome::Patched { lines_changed })
}
