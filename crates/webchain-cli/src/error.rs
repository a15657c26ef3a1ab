//! Error types for webchain-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from webchain-core
    #[error(transparent)]
    Core(#[from] webchain_core::Error),

    /// Error from webchain-fs
    #[error(transparent)]
    Fs(#[from] webchain_fs::Error),

    /// Error from webchain-plugins
    #[error(transparent)]
    Plugins(#[from] webchain_plugins::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
