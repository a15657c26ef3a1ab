//! User-declared project options (`webchain.toml`).

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use webchain_fs::{ConfigStore, NormalizedPath, ProjectPath};

use crate::Result;
use crate::variant::BundlerMajor;

/// Options read from the project's options file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectOptions {
    /// Build output directory, relative to the project root.
    pub output_dir: String,
    /// Public URL the bundle is served from.
    pub public_path: String,
    /// Directory (under `output_dir`) that generated assets are nested in.
    pub assets_dir: String,
    /// Output path of the generated index document, relative to `output_dir`.
    pub index_path: String,
    pub filename_hashing: bool,
    /// `crossorigin` attribute for injected tags.
    pub crossorigin: Option<String>,
    /// Emit subresource integrity hashes.
    pub integrity: bool,
    pub bundler_major: BundlerMajor,
    /// Multi-page declarations. `None` means single-page mode.
    pub pages: Option<PageDeclarations>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            output_dir: "dist".to_string(),
            public_path: "/".to_string(),
            assets_dir: String::new(),
            index_path: "index.html".to_string(),
            filename_hashing: true,
            crossorigin: None,
            integrity: false,
            bundler_major: BundlerMajor::default(),
            pages: None,
        }
    }
}

impl ProjectOptions {
    /// Load `webchain.toml` from `root`, falling back to defaults when the
    /// file is absent.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(ProjectPath::OptionsFile.as_str());
        let loaded = ConfigStore::new().load_optional(&path)?;
        Ok(loaded.unwrap_or_default())
    }

    pub fn with_pages(mut self, pages: PageDeclarations) -> Self {
        self.pages = Some(pages);
        self
    }
}

/// Module list of a page entry: one path or several.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntryModules {
    One(String),
    Many(Vec<String>),
}

impl EntryModules {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            EntryModules::One(path) => vec![path.clone()],
            EntryModules::Many(paths) => paths.clone(),
        }
    }
}

/// Table form of a page declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageConfig {
    pub entry: EntryModules,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub chunks: Option<Vec<String>>,
    /// Additional rendering options forwarded to the page's plugin.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageConfig {
    pub fn new(entry: EntryModules) -> Self {
        Self {
            entry,
            template: None,
            filename: None,
            chunks: None,
            extra: Map::new(),
        }
    }
}

/// A page as declared: either a bare entry path or a full table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageDeclaration {
    Entry(String),
    Config(PageConfig),
}

impl PageDeclaration {
    /// Normalize the bare-string form into a table with only `entry`.
    pub fn into_config(self) -> PageConfig {
        match self {
            PageDeclaration::Entry(entry) => PageConfig::new(EntryModules::One(entry)),
            PageDeclaration::Config(config) => config,
        }
    }
}

impl From<&str> for PageDeclaration {
    fn from(entry: &str) -> Self {
        PageDeclaration::Entry(entry.to_string())
    }
}

impl From<PageConfig> for PageDeclaration {
    fn from(config: PageConfig) -> Self {
        PageDeclaration::Config(config)
    }
}

/// Page declarations in the order they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDeclarations(Vec<(String, PageDeclaration)>);

impl PageDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page; a repeated name replaces the earlier declaration in place.
    pub fn push(&mut self, name: impl Into<String>, declaration: impl Into<PageDeclaration>) {
        let name = name.into();
        let declaration = declaration.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = declaration,
            None => self.0.push((name, declaration)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageDeclaration)> {
        self.0.iter().map(|(name, decl)| (name.as_str(), decl))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N, D> FromIterator<(N, D)> for PageDeclarations
where
    N: Into<String>,
    D: Into<PageDeclaration>,
{
    fn from_iter<I: IntoIterator<Item = (N, D)>>(iter: I) -> Self {
        let mut pages = Self::new();
        for (name, declaration) in iter {
            pages.push(name, declaration);
        }
        pages
    }
}

impl<'de> Deserialize<'de> for PageDeclarations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PagesVisitor;

        impl<'de> Visitor<'de> for PagesVisitor {
            type Value = PageDeclarations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of page declarations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut pages = PageDeclarations::new();
                while let Some((name, declaration)) = map.next_entry::<String, PageDeclaration>()? {
                    pages.push(name, declaration);
                }
                Ok(pages)
            }
        }

        deserializer.deserialize_map(PagesVisitor)
    }
}
