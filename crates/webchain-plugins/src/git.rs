//! Dirty working tree preflight.

use std::path::Path;

use git2::{Repository, StatusOptions};
use tracing::{debug, warn};

use crate::error::Result;
use crate::prompt::Prompter;

pub const DIRTY_WARNING: &str = "There are uncommitted changes in the current repository, \
     it's recommended to commit or stash them first.";
pub const PROCEED_QUESTION: &str = "Still proceed?";

/// Whether `dir` is inside a git working tree.
pub fn is_git_repository(dir: &Path) -> bool {
    Repository::discover(dir).is_ok_and(|repo| !repo.is_bare())
}

/// Whether the working tree containing `dir` has any change: modified,
/// staged, or untracked and not ignored.
pub fn is_dirty(dir: &Path) -> Result<bool> {
    let repo = Repository::discover(dir)?;
    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .include_ignored(false)
        .recurse_untracked_dirs(false);
    let statuses = repo.statuses(Some(&mut options))?;
    Ok(!statuses.is_empty())
}

/// Ask before touching a dirty working tree.
///
/// Returns `true` when it is fine to continue: outside a repository, on a
/// clean tree, or when the user confirms. The question defaults to no.
pub fn confirm_if_git_dirty(dir: &Path, prompter: &dyn Prompter) -> Result<bool> {
    if !is_git_repository(dir) {
        debug!(dir = %dir.display(), "not a git repository, skipping dirty check");
        return Ok(true);
    }
    if !is_dirty(dir)? {
        return Ok(true);
    }

    warn!(dir = %dir.display(), "working tree has uncommitted changes");
    prompter.warn(DIRTY_WARNING);
    prompter.confirm(PROCEED_QUESTION, false)
}
