//! Git repository fixtures.

use std::fs;
use std::path::Path;

/// Initialises a real git repository using `git2` (no commit, no config).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Stage every file under `path` and commit it with a fixed signature.
///
/// Leaves the working tree clean.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &git2::Repository, message: &str) {
    let mut index = repo.index().expect("commit_all: failed to open index");
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .expect("commit_all: failed to stage files");
    index.write().expect("commit_all: failed to write index");

    let tree_id = index.write_tree().expect("commit_all: failed to write tree");
    let tree = repo.find_tree(tree_id).expect("commit_all: failed to find tree");
    let signature = git2::Signature::now("Test User", "test@test.com")
        .expect("commit_all: failed to build signature");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .expect("commit_all: failed to commit");
}

/// Initialise a repository at `path` with a single commit containing a
/// README, leaving the working tree clean.
///
/// # Panics
/// Panics if any filesystem or git operation fails.
pub fn clean_git_repo(path: &Path) -> git2::Repository {
    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("clean_git_repo: failed to write README.md: {e}"));
    let repo = real_git_repo(path);
    commit_all(&repo, "Initial commit");
    repo
}
