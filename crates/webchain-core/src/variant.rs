//! Build variant resolution
//!
//! A [`BuildVariant`] is the environment snapshot taken once at the start of
//! a build. [`VariantResolver`] turns it, together with the bundler major
//! version, into the set of decisions the rest of composition reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The only build target this composer handles.
pub const APP_TARGET: &str = "app";

/// Environment variable naming an alternative build target.
pub const ENV_BUILD_TARGET: &str = "WEBCHAIN_BUILD_TARGET";
/// Environment variable carrying the production/development/test mode.
pub const ENV_NODE_ENV: &str = "NODE_ENV";
/// Set when the build produces a legacy + modern bundle pair.
pub const ENV_MODERN_MODE: &str = "WEBCHAIN_MODERN_MODE";
/// Set while building the modern half of the pair.
pub const ENV_MODERN_BUILD: &str = "WEBCHAIN_MODERN_BUILD";

/// Build mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    #[default]
    Development,
    Test,
}

impl BuildMode {
    /// Map a `NODE_ENV` value. Anything unrecognized is development.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => BuildMode::Production,
            Some("test") => BuildMode::Test,
            _ => BuildMode::Development,
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(BuildMode::Production),
            "development" | "dev" => Ok(BuildMode::Development),
            "test" => Ok(BuildMode::Test),
            other => Err(format!("unknown build mode: {other}")),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Production => write!(f, "production"),
            BuildMode::Development => write!(f, "development"),
            BuildMode::Test => write!(f, "test"),
        }
    }
}

/// Major version of the bundler consuming the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BundlerMajor {
    V4,
    #[default]
    V5,
}

impl TryFrom<u8> for BundlerMajor {
    type Error = Error;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            4 => Ok(BundlerMajor::V4),
            5 => Ok(BundlerMajor::V5),
            other => Err(Error::UnsupportedBundler(other)),
        }
    }
}

impl From<BundlerMajor> for u8 {
    fn from(value: BundlerMajor) -> Self {
        match value {
            BundlerMajor::V4 => 4,
            BundlerMajor::V5 => 5,
        }
    }
}

/// Environment snapshot for one build invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildVariant {
    /// Explicit build target, if any.
    pub target: Option<String>,
    pub mode: BuildMode,
    /// A legacy/modern bundle pair is being produced.
    pub modern_mode: bool,
    /// This run builds the modern half of the pair.
    pub modern_build: bool,
}

impl BuildVariant {
    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Snapshot from an arbitrary key lookup.
    ///
    /// Flags are set when the variable is present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        Self {
            target: lookup(ENV_BUILD_TARGET).filter(|v| !v.is_empty()),
            mode: BuildMode::from_node_env(lookup(ENV_NODE_ENV).as_deref()),
            modern_mode: flag(ENV_MODERN_MODE),
            modern_build: flag(ENV_MODERN_BUILD),
        }
    }

    pub fn production() -> Self {
        Self {
            mode: BuildMode::Production,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Mark this run as the legacy half of a modern-mode pair.
    pub fn legacy(mut self) -> Self {
        self.modern_mode = true;
        self.modern_build = false;
        self
    }

    /// Mark this run as the modern half of a modern-mode pair.
    pub fn modern(mut self) -> Self {
        self.modern_mode = true;
        self.modern_build = true;
        self
    }

    /// Unset or `app` targets are handled here; anything else belongs to a
    /// sibling pipeline.
    pub fn targets_app(&self) -> bool {
        self.target.as_deref().is_none_or(|t| t == APP_TARGET)
    }

    pub fn is_production(&self) -> bool {
        self.mode == BuildMode::Production
    }

    pub fn is_legacy_bundle(&self) -> bool {
        self.modern_mode && !self.modern_build
    }
}

/// Key of the vendor cache group, which the bundler renamed between majors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorGroupKey {
    Vendors,
    DefaultVendors,
}

impl VendorGroupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorGroupKey::Vendors => "vendors",
            VendorGroupKey::DefaultVendors => "defaultVendors",
        }
    }
}

/// How chunk ids are kept stable across builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkIdStrategy {
    /// Leave it to the bundler.
    BundlerDefault,
    /// Register a plugin that names chunks by name, or by a hash of their
    /// module ids when unnamed.
    NameOrContentHash,
}

/// Decisions derived from a variant, consumed by app composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDecisions {
    pub production: bool,
    pub legacy_bundle: bool,
    /// `None` when chunk splitting is skipped.
    pub split_chunks: Option<VendorGroupKey>,
    pub chunk_ids: ChunkIdStrategy,
    /// Whether the static asset copy step may run at all.
    pub copy_public: bool,
}

/// Decision table over [`BuildVariant`] and [`BundlerMajor`].
#[derive(Debug, Clone, Copy)]
pub struct VariantResolver {
    bundler: BundlerMajor,
}

impl VariantResolver {
    pub fn new(bundler: BundlerMajor) -> Self {
        Self { bundler }
    }

    /// Resolve the decisions for `variant`, or `None` when the run targets
    /// something other than an app.
    pub fn resolve(&self, variant: &BuildVariant) -> Option<VariantDecisions> {
        if !variant.targets_app() {
            tracing::debug!(target = ?variant.target, "build target is not app, skipping");
            return None;
        }

        let production = variant.is_production();
        let legacy_bundle = variant.is_legacy_bundle();

        let split_chunks = (variant.mode != BuildMode::Test).then_some(match self.bundler {
            BundlerMajor::V4 => VendorGroupKey::Vendors,
            BundlerMajor::V5 => VendorGroupKey::DefaultVendors,
        });

        let chunk_ids = match (self.bundler, production) {
            (BundlerMajor::V4, true) => ChunkIdStrategy::NameOrContentHash,
            _ => ChunkIdStrategy::BundlerDefault,
        };

        Some(VariantDecisions {
            production,
            legacy_bundle,
            split_chunks,
            chunk_ids,
            // The modern build copies once for the pair.
            copy_public: !legacy_bundle,
        })
    }
}
