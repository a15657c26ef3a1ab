//! Filesystem abstraction for webchain
//!
//! Provides normalized path handling, lexical relativization, and an
//! injectable existence check so configuration composition never touches the
//! real filesystem directly.

pub mod config;
pub mod constants;
pub mod error;
pub mod path;
pub mod probe;

pub use config::{ConfigStore, canonical_root};
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, ensure_relative};
pub use probe::{MemoryProbe, PathProbe, RealFs};
