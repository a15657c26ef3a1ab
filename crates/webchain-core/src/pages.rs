//! Page and entry planning
//!
//! Single-page builds get one rendering plugin named `html`. Multi-page
//! builds drop the default entry and get, per declared page and in
//! declaration order, one entry point and one `html-<page>` plugin.

use serde_json::{Map, Value};
use tracing::{debug, info};
use webchain_fs::{NormalizedPath, PathProbe, ensure_relative};

use crate::options::{PageConfig, PageDeclaration, PageDeclarations};
use crate::tree::{ConfigBuilder, PluginRegistration};

/// Name of the shared vendor chunk emitted by the chunk splitting rule.
pub const VENDOR_CHUNK: &str = "chunk-vendors";
/// Name of the shared common chunk emitted by the chunk splitting rule.
pub const COMMON_CHUNK: &str = "chunk-common";
/// Keys of a page declaration that are consumed by planning and never
/// forwarded to the rendering plugin.
pub const RESERVED_PAGE_KEYS: [&str; 4] = ["entry", "template", "filename", "chunks"];
/// Implementation reference of the page rendering plugin.
pub const HTML_PLUGIN: &str = "html-webpack-plugin";
/// Registration name of the single-page rendering plugin.
pub const SINGLE_PAGE_PLUGIN: &str = "html";

/// Registration name of a page's rendering plugin.
pub fn page_plugin_name(page: &str) -> String {
    format!("html-{page}")
}

/// One declared page with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    pub name: String,
    /// Module paths as declared (project-relative or absolute).
    pub entry: Vec<String>,
    /// Template path as declared, defaulting to `public/<name>.html`.
    pub template: String,
    /// Output path as declared, defaulting to `<name>.html`.
    pub filename: String,
    /// Chunks injected into the page, defaulting to vendor, common, then the
    /// page's own chunk.
    pub chunks: Vec<String>,
    /// Extra rendering options, never containing a reserved key.
    pub extra: Map<String, Value>,
}

impl PageDescriptor {
    pub fn from_declaration(name: &str, declaration: PageDeclaration) -> Self {
        let PageConfig {
            entry,
            template,
            filename,
            chunks,
            extra,
        } = declaration.into_config();

        let extra = extra
            .into_iter()
            .filter(|(key, _)| !RESERVED_PAGE_KEYS.contains(&key.as_str()))
            .collect();

        Self {
            name: name.to_string(),
            entry: entry.to_vec(),
            template: template.unwrap_or_else(|| format!("public/{name}.html")),
            filename: filename.unwrap_or_else(|| format!("{name}.html")),
            chunks: chunks.unwrap_or_else(|| {
                vec![
                    VENDOR_CHUNK.to_string(),
                    COMMON_CHUNK.to_string(),
                    name.to_string(),
                ]
            }),
            extra,
        }
    }
}

/// Ordered template candidates with a guaranteed fallback.
///
/// The first candidate that exists wins; the fallback is returned without
/// being checked.
#[derive(Debug, Clone)]
pub struct TemplateChain {
    candidates: Vec<NormalizedPath>,
    fallback: NormalizedPath,
}

impl TemplateChain {
    pub fn new(fallback: NormalizedPath) -> Self {
        Self {
            candidates: Vec::new(),
            fallback,
        }
    }

    /// Append a candidate (builder pattern).
    pub fn candidate(mut self, path: NormalizedPath) -> Self {
        self.candidates.push(path);
        self
    }

    pub fn resolve(&self, probe: &dyn PathProbe) -> NormalizedPath {
        match self.candidates.iter().find(|path| probe.exists(path)) {
            Some(found) => found.clone(),
            None => {
                debug!(fallback = %self.fallback, "no template candidate exists, using fallback");
                self.fallback.clone()
            }
        }
    }
}

/// Fixed inputs for planning pages of one project.
#[derive(Debug, Clone)]
pub struct PagePlanner {
    /// Project root that relative paths resolve against.
    pub root: NormalizedPath,
    /// Absolute output directory.
    pub output_dir: NormalizedPath,
    /// The project-wide template, `public/index.html`.
    pub shared_template: NormalizedPath,
    /// Built-in template used when the project has none.
    pub fallback_template: NormalizedPath,
    /// Options every rendering plugin starts from.
    pub base_html_options: Map<String, Value>,
}

impl PagePlanner {
    /// Register the single-page rendering plugin.
    ///
    /// Returns the resolved template path.
    pub fn plan_single_page(&self, builder: &mut ConfigBuilder, probe: &dyn PathProbe) -> NormalizedPath {
        let template = TemplateChain::new(self.fallback_template.clone())
            .candidate(self.shared_template.clone())
            .resolve(probe);

        let mut options = self.base_html_options.clone();
        options.insert("template".into(), Value::from(template.as_str()));

        builder.plugin(
            SINGLE_PAGE_PLUGIN,
            PluginRegistration::new(HTML_PLUGIN, vec![Value::Object(options)]),
        );
        template
    }

    /// Replace all entry points with one per declared page and register each
    /// page's rendering plugin, in declaration order.
    ///
    /// Returns the resolved template path of every page.
    pub fn plan_pages(
        &self,
        builder: &mut ConfigBuilder,
        pages: &PageDeclarations,
        probe: &dyn PathProbe,
    ) -> Vec<NormalizedPath> {
        builder.clear_entries();
        info!(pages = ?pages.names(), "planning multi-page build");

        pages
            .iter()
            .map(|(name, declaration)| {
                let descriptor = PageDescriptor::from_declaration(name, declaration.clone());
                self.plan_page(builder, &descriptor, probe)
            })
            .collect()
    }

    /// Register the entry point and rendering plugin for one page.
    pub fn plan_page(
        &self,
        builder: &mut ConfigBuilder,
        page: &PageDescriptor,
        probe: &dyn PathProbe,
    ) -> NormalizedPath {
        let modules = page
            .entry
            .iter()
            .map(|module| self.root.resolve(module).to_string());
        builder.merge_entry(&page.name, modules);

        let template = TemplateChain::new(self.fallback_template.clone())
            .candidate(self.root.resolve(&page.template))
            .candidate(self.shared_template.clone())
            .resolve(probe);

        let filename = ensure_relative(&self.output_dir, &page.filename);

        let mut options = self.base_html_options.clone();
        options.insert(
            "chunks".into(),
            Value::Array(page.chunks.iter().cloned().map(Value::from).collect()),
        );
        options.insert("template".into(), Value::from(template.as_str()));
        options.insert("filename".into(), Value::from(filename));
        options.extend(page.extra.clone());

        builder.plugin(
            &page_plugin_name(&page.name),
            PluginRegistration::new(HTML_PLUGIN, vec![Value::Object(options)]),
        );
        template
    }
}
