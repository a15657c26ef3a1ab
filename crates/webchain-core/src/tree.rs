//! Configuration tree and its builder
//!
//! [`ConfigTree`] is what the bundler consumes: output naming, chunk
//! splitting rules, entry points and an ordered plugin list. It has no
//! public write API. All writes go through [`ConfigBuilder`], which is owned
//! by exactly one build invocation and records every mutation under a name.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::registry::NamedRegistry;

/// Output naming and placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,
}

/// One chunk-splitting cache group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    pub name: String,
    /// Module path pattern, as a regular expression source string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    pub priority: i32,
    pub chunks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_chunks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuse_existing_chunk: Option<bool>,
}

/// Chunk-splitting rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunks {
    pub cache_groups: NamedRegistry<CacheGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<SplitChunks>,
}

/// A plugin instance: implementation reference plus constructor arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginRegistration {
    pub implementation: String,
    pub args: Vec<Value>,
}

impl PluginRegistration {
    pub fn new(implementation: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            implementation: implementation.into(),
            args,
        }
    }

    /// First constructor argument, which is the options object for every
    /// plugin the composer registers.
    pub fn options(&self) -> Option<&serde_json::Map<String, Value>> {
        self.args.first().and_then(Value::as_object)
    }
}

/// The finished configuration handed to the bundler.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTree {
    output: OutputConfig,
    optimization: Optimization,
    entry_points: NamedRegistry<Vec<String>>,
    #[serde(serialize_with = "plugins_as_list")]
    plugins: NamedRegistry<PluginRegistration>,
}

impl ConfigTree {
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn optimization(&self) -> &Optimization {
        &self.optimization
    }

    pub fn entry_points(&self) -> &NamedRegistry<Vec<String>> {
        &self.entry_points
    }

    pub fn plugins(&self) -> &NamedRegistry<PluginRegistration> {
        &self.plugins
    }

    /// Pretty JSON in registration order.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Serialize)]
struct NamedPlugin<'a> {
    name: &'a str,
    implementation: &'a str,
    args: &'a [Value],
}

fn plugins_as_list<S: serde::Serializer>(
    plugins: &NamedRegistry<PluginRegistration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(plugins.iter().map(|(name, plugin)| NamedPlugin {
        name,
        implementation: &plugin.implementation,
        args: &plugin.args,
    }))
}

/// Exclusive writer for one [`ConfigTree`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    tree: ConfigTree,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.tree.output.path = Some(path.into());
        self
    }

    pub fn public_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.tree.output.public_path = Some(path.into());
        self
    }

    pub fn filename(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.tree.output.filename = Some(pattern.into());
        self
    }

    pub fn chunk_filename(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.tree.output.chunk_filename = Some(pattern.into());
        self
    }

    pub fn split_chunks(&mut self, rules: SplitChunks) -> &mut Self {
        debug!(groups = ?rules.cache_groups.names(), "registering chunk splitting rules");
        self.tree.optimization.split_chunks = Some(rules);
        self
    }

    /// Append modules to the entry point `name`, creating it if absent.
    pub fn merge_entry<I, S>(&mut self, name: &str, modules: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.tree.entry_points.get_or_insert_with(name, Vec::new);
        entry.extend(modules.into_iter().map(Into::into));
        debug!(entry = name, modules = ?entry, "merged entry point");
        self
    }

    /// Drop every entry point.
    pub fn clear_entries(&mut self) -> &mut Self {
        debug!(count = self.tree.entry_points.len(), "clearing entry points");
        self.tree.entry_points.clear();
        self
    }

    /// Register or replace the plugin at `name`.
    pub fn plugin(&mut self, name: &str, registration: PluginRegistration) -> &mut Self {
        debug!(
            plugin = name,
            implementation = %registration.implementation,
            "registering plugin"
        );
        if self.tree.plugins.register(name, registration).is_some() {
            debug!(plugin = name, "replaced existing plugin in place");
        }
        self
    }

    pub fn remove_plugin(&mut self, name: &str) -> &mut Self {
        self.tree.plugins.remove(name);
        self
    }

    /// Read access to the tree under construction.
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn build(self) -> ConfigTree {
        self.tree
    }
}
