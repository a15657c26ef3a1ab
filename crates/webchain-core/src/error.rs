//! Error types for webchain-core

/// Result type for webchain-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading inputs for composition.
///
/// Composition itself does not fail: a target mismatch, a missing template
/// or a missing public directory are ordinary branches.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid bundler major version in project options
    #[error("Unsupported bundler major version: {0} (expected 4 or 5)")]
    UnsupportedBundler(u8),

    /// Filesystem or config parse error from webchain-fs
    #[error(transparent)]
    Fs(#[from] webchain_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
