//! App-target composition
//!
//! Seeds the base tree and applies every app-specific mutation in a fixed
//! order: output names, chunk splitting, index relocation, stable chunk ids,
//! rendering plugins, cross-origin policy, static copy.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};
use webchain_fs::{ConfigStore, NormalizedPath, PathProbe, ProjectPath};

use crate::Result;
use crate::filename::output_filename;
use crate::options::ProjectOptions;
use crate::pages::{COMMON_CHUNK, PagePlanner, VENDOR_CHUNK};
use crate::tree::{CacheGroup, ConfigBuilder, ConfigTree, PluginRegistration, SplitChunks};
use crate::variant::{BuildVariant, ChunkIdStrategy, VariantDecisions, VariantResolver};

/// Name of the default single-page entry point.
pub const DEFAULT_ENTRY: &str = "app";
/// Location of the built-in page template inside the project's dependencies.
pub const FALLBACK_TEMPLATE: &str = "node_modules/@vue/cli-service/lib/config/index-default.html";
/// Static copy always skips these, in addition to resolved templates.
pub const COPY_IGNORE_DEFAULTS: [&str; 1] = ["**/.DS_Store"];

/// Everything one composition run reads.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub root: NormalizedPath,
    pub options: ProjectOptions,
    pub variant: BuildVariant,
    /// `name` from the project's package manifest.
    pub package_name: Option<String>,
    pub fallback_template: NormalizedPath,
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
}

impl ServiceContext {
    pub fn new(root: NormalizedPath, options: ProjectOptions, variant: BuildVariant) -> Self {
        let fallback_template = root.join(FALLBACK_TEMPLATE);
        Self {
            root,
            options,
            variant,
            package_name: None,
            fallback_template,
        }
    }

    /// Read options and package name from the project at `root`.
    pub fn load(root: NormalizedPath, variant: BuildVariant) -> Result<Self> {
        let options = ProjectOptions::load(&root)?;
        let manifest: Option<PackageManifest> =
            ConfigStore::new().load_optional(&root.join(ProjectPath::PackageJson.as_str()))?;
        let package_name = manifest.and_then(|m| m.name);
        Ok(Self::new(root, options, variant).with_package_name(package_name))
    }

    pub fn with_package_name(mut self, name: Option<String>) -> Self {
        self.package_name = name;
        self
    }

    pub fn with_fallback_template(mut self, path: NormalizedPath) -> Self {
        self.fallback_template = path;
        self
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> NormalizedPath {
        self.root.resolve(&self.options.output_dir)
    }
}

/// Result of applying the app configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum AppOutcome {
    /// The run targets something other than an app; nothing was written.
    Skipped,
    Applied {
        /// Ignore globs handed to the static copy step.
        copy_ignore: Vec<String>,
    },
}

/// Seed the tree with the default entry and output placement.
pub fn seed_base(builder: &mut ConfigBuilder, ctx: &ServiceContext) {
    let main = ctx.root.join(ProjectPath::MainEntry.as_str());
    builder
        .merge_entry(DEFAULT_ENTRY, [main.to_string()])
        .output_path(ctx.output_dir().to_string())
        .public_path(ctx.options.public_path.clone());
}

/// Compose a full tree: base seed followed by the app configuration.
pub fn compose(ctx: &ServiceContext, probe: &dyn PathProbe) -> ConfigTree {
    let mut builder = ConfigBuilder::new();
    seed_base(&mut builder, ctx);
    apply_app_config(&mut builder, ctx, probe);
    builder.build()
}

/// Apply every app-target mutation to `builder`.
pub fn apply_app_config(
    builder: &mut ConfigBuilder,
    ctx: &ServiceContext,
    probe: &dyn PathProbe,
) -> AppOutcome {
    let options = &ctx.options;
    let Some(decisions) = VariantResolver::new(options.bundler_major).resolve(&ctx.variant) else {
        return AppOutcome::Skipped;
    };
    info!(
        mode = %ctx.variant.mode,
        legacy = decisions.legacy_bundle,
        "applying app configuration"
    );

    let output_dir = ctx.output_dir();

    let filename = output_filename(&decisions, options.filename_hashing, &options.assets_dir);
    builder.filename(filename.clone()).chunk_filename(filename);

    if let Some(vendor_key) = decisions.split_chunks {
        builder.split_chunks(split_chunk_rules(vendor_key.as_str()));
    }

    if options.index_path != "index.html" {
        builder.plugin(
            "move-index",
            PluginRegistration::new(
                "@vue/cli-service/lib/webpack/MovePlugin",
                vec![
                    Value::from(output_dir.join("index.html").as_str()),
                    Value::from(output_dir.join(&options.index_path).as_str()),
                ],
            ),
        );
    }

    register_chunk_ids(builder, &decisions);

    let planner = PagePlanner {
        root: ctx.root.clone(),
        output_dir: output_dir.clone(),
        shared_template: ctx.root.join(ProjectPath::IndexTemplate.as_str()),
        fallback_template: ctx.fallback_template.clone(),
        base_html_options: base_html_options(ctx),
    };
    let templates = match &options.pages {
        None => vec![planner.plan_single_page(builder, probe)],
        Some(pages) => planner.plan_pages(builder, pages, probe),
    };

    let mut copy_ignore: Vec<String> = COPY_IGNORE_DEFAULTS.iter().map(|s| s.to_string()).collect();
    copy_ignore.extend(templates.iter().map(|t| t.to_string()));

    if options.crossorigin.is_some() || options.integrity {
        builder.plugin(
            "cors",
            PluginRegistration::new(
                "@vue/cli-service/lib/webpack/CorsPlugin",
                vec![json!({
                    "crossorigin": options.crossorigin,
                    "integrity": options.integrity,
                    "publicPath": options.public_path,
                })],
            ),
        );
    }

    let public_dir = ctx.root.join(ProjectPath::PublicDir.as_str());
    if decisions.copy_public && probe.exists(&public_dir) {
        builder.plugin(
            "copy",
            PluginRegistration::new(
                "copy-webpack-plugin",
                vec![json!({
                    "patterns": [{
                        "from": public_dir.as_str(),
                        "to": output_dir.as_str(),
                        "toType": "dir",
                        "globOptions": { "ignore": copy_ignore },
                    }]
                })],
            ),
        );
    } else {
        debug!(public_dir = %public_dir, "static copy not registered");
    }

    AppOutcome::Applied { copy_ignore }
}

fn split_chunk_rules(vendor_key: &str) -> SplitChunks {
    let mut rules = SplitChunks::default();
    rules.cache_groups.register(
        vendor_key,
        CacheGroup {
            name: VENDOR_CHUNK.to_string(),
            test: Some(r"[\\/]node_modules[\\/]".to_string()),
            priority: -10,
            chunks: "initial".to_string(),
            min_chunks: None,
            reuse_existing_chunk: None,
        },
    );
    rules.cache_groups.register(
        "common",
        CacheGroup {
            name: COMMON_CHUNK.to_string(),
            test: None,
            priority: -20,
            chunks: "initial".to_string(),
            min_chunks: Some(2),
            reuse_existing_chunk: Some(true),
        },
    );
    rules
}

fn register_chunk_ids(builder: &mut ConfigBuilder, decisions: &VariantDecisions) {
    if decisions.chunk_ids == ChunkIdStrategy::NameOrContentHash {
        builder.plugin(
            "named-chunks",
            PluginRegistration::new(
                "webpack.NamedChunksPlugin",
                vec![json!({
                    "scheme": "name-or-content-hash",
                    "unnamedPrefix": "chunk-",
                })],
            ),
        );
    }
}

fn base_html_options(ctx: &ServiceContext) -> Map<String, Value> {
    let mut options = Map::new();
    if let Some(name) = &ctx.package_name {
        options.insert("title".into(), Value::from(name.as_str()));
    }
    options
}
