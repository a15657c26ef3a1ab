//! Shared test utilities for the webchain workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures
//! - [`project`]: [`project::TestProject`] builder for on-disk projects

pub mod git;
pub mod project;
