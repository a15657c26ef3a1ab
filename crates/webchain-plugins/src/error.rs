use std::path::PathBuf;

/// Errors that can occur while acquiring a plugin.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid semver version string.
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    /// Invalid version range.
    #[error("invalid version range '{range}': {source}")]
    InvalidRange {
        range: String,
        source: semver::Error,
    },

    /// Shortcut pattern failed to compile.
    #[error("invalid shortcut pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// Package manager command exited unsuccessfully.
    #[error(
        "failed to install '{name}' (exit code {}); see the output above\n  command: {command}",
        .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    InstallFailed {
        name: String,
        command: String,
        exit_code: Option<i32>,
    },

    /// Package manager binary is not on PATH.
    #[error("'{tool}' not found on PATH{}", .hint.as_deref().unwrap_or(""))]
    PackageManagerNotFound { tool: String, hint: Option<String> },

    /// A built-in generator module could not be located.
    #[error("generator module '{module}' not found from {context}")]
    GeneratorNotFound { module: String, context: PathBuf },

    /// Generator command exited unsuccessfully.
    #[error(
        "generator '{id}' failed (exit code {})\n  command: {command}",
        .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    GeneratorFailed {
        id: String,
        command: String,
        exit_code: Option<i32>,
    },

    /// Interactive prompt could not be answered.
    #[error("prompt failed: {0}")]
    Prompt(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Fs(#[from] webchain_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
