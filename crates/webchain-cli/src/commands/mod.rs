//! Command implementations for webchain-cli

pub mod add;
pub mod inspect;

pub use add::run_add;
pub use inspect::run_inspect;
