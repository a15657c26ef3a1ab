//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation.

use colored::Colorize;
use dialoguer::Confirm;
use webchain_plugins::{Prompter, Result};

/// Asks questions on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn warn(&self, message: &str) {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| webchain_plugins::Error::Prompt(Box::new(e)))
    }
}
