//! Interactive questions asked during `add`.

use crate::error::Result;

/// Asks the user questions. Implementations block until answered.
pub trait Prompter {
    /// Show a warning that precedes a question.
    fn warn(&self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Answers every question with its default, without printing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAnswers;

impl Prompter for DefaultAnswers {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        tracing::debug!(message, default, "answering with default");
        Ok(default)
    }
}
