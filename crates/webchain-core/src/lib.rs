//! Build configuration composition for webchain
//!
//! This crate assembles the configuration tree a bundler consumes:
//!
//! - **Named registry**: insertion-ordered, replace-in-place registration
//! - **Configuration tree**: output, chunk splitting, entry points, plugins,
//!   written only through [`ConfigBuilder`]
//! - **Variant resolution**: production/development/test and legacy/modern
//!   decisions per bundler major
//! - **Page planning**: single-page and multi-page rendering plugins
//!
//! # Example
//!
//! ```
//! use webchain_core::{BuildVariant, ProjectOptions, ServiceContext, compose};
//! use webchain_fs::{MemoryProbe, NormalizedPath};
//!
//! let ctx = ServiceContext::new(
//!     NormalizedPath::new("/app"),
//!     ProjectOptions::default(),
//!     BuildVariant::production(),
//! );
//! let tree = compose(&ctx, &MemoryProbe::new());
//! assert!(tree.plugins().contains("html"));
//! ```

pub mod app;
pub mod error;
pub mod filename;
pub mod options;
pub mod pages;
pub mod registry;
pub mod tree;
pub mod variant;

pub use app::{AppOutcome, ServiceContext, apply_app_config, compose, seed_base};
pub use error::{Error, Result};
pub use filename::{CONTENT_HASH_TOKEN, asset_path, output_filename};
pub use options::{EntryModules, PageConfig, PageDeclaration, PageDeclarations, ProjectOptions};
pub use pages::{PageDescriptor, PagePlanner, TemplateChain};
pub use registry::NamedRegistry;
pub use tree::{CacheGroup, ConfigBuilder, ConfigTree, OutputConfig, PluginRegistration, SplitChunks};
pub use variant::{
    BuildMode, BuildVariant, BundlerMajor, ChunkIdStrategy, VariantDecisions, VariantResolver,
    VendorGroupKey,
};
