//! Legacy shortcuts for router and state management.
//!
//! Consulted before ordinary plugin resolution when the project's service
//! package is on the legacy line. A matching shortcut runs a built-in
//! generator instead of installing anything.

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::generator::{GeneratorOptions, GeneratorSpec};
use crate::prompt::Prompter;

/// Collects a shortcut's generator options, possibly by asking the user.
pub type OptionsHandler = Box<dyn Fn(&dyn Prompter) -> Result<GeneratorOptions>>;

pub const ROUTER_HISTORY_QUESTION: &str =
    "Use history mode for router? (Requires proper server setup for index fallback in production)";

/// One `(pattern, handler)` pair.
pub struct Shortcut {
    pattern: Regex,
    generator_id: String,
    module: String,
    options: OptionsHandler,
}

impl Shortcut {
    pub fn matches(&self, plugin: &str) -> bool {
        self.pattern.is_match(plugin)
    }

    pub fn generator_id(&self) -> &str {
        &self.generator_id
    }

    /// Build the generator to run, collecting its options.
    pub fn generator(&self, prompter: &dyn Prompter) -> Result<GeneratorSpec> {
        Ok(GeneratorSpec {
            id: self.generator_id.clone(),
            module: self.module.clone(),
            options: (self.options)(prompter)?,
        })
    }
}

impl std::fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shortcut")
            .field("pattern", &self.pattern.as_str())
            .field("generator_id", &self.generator_id)
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Ordered shortcut registry; the first matching pattern wins.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    entries: Vec<Shortcut>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the router and state management shortcuts.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(
            r"^(@vue/)?router$",
            "core:router",
            "@vue/cli-service/generator/router",
            Box::new(|prompter: &dyn Prompter| {
                let history = prompter.confirm(ROUTER_HISTORY_QUESTION, true)?;
                let mut options = GeneratorOptions::new();
                options.insert("routerHistoryMode".into(), Value::Bool(history));
                Ok(options)
            }),
        )?;
        registry.register(
            r"^(@vue/)?vuex$",
            "core:vuex",
            "@vue/cli-service/generator/vuex",
            Box::new(|_: &dyn Prompter| Ok(GeneratorOptions::new())),
        )?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        pattern: &str,
        generator_id: &str,
        module: &str,
        options: OptionsHandler,
    ) -> Result<()> {
        let pattern = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.entries.push(Shortcut {
            pattern,
            generator_id: generator_id.to_string(),
            module: module.to_string(),
            options,
        });
        Ok(())
    }

    pub fn find(&self, plugin: &str) -> Option<&Shortcut> {
        self.entries.iter().find(|s| s.matches(plugin))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::DefaultAnswers;
    use serde_json::json;

    #[test]
    fn test_builtins_match_short_and_scoped() {
        let registry = ShortcutRegistry::with_builtins().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("router").unwrap().generator_id(), "core:router");
        assert_eq!(registry.find("@vue/router").unwrap().generator_id(), "core:router");
        assert_eq!(registry.find("vuex").unwrap().generator_id(), "core:vuex");
        assert!(registry.find("vue-router").is_none());
        assert!(registry.find("@vue/cli-plugin-router").is_none());
        assert!(registry.find("eslint").is_none());
    }

    #[test]
    fn test_router_asks_for_history_mode() {
        let registry = ShortcutRegistry::with_builtins().unwrap();
        let spec = registry.find("router").unwrap().generator(&DefaultAnswers).unwrap();
        assert_eq!(spec.module, "@vue/cli-service/generator/router");
        assert_eq!(spec.options["routerHistoryMode"], json!(true));
    }

    #[test]
    fn test_vuex_has_no_options() {
        let registry = ShortcutRegistry::with_builtins().unwrap();
        let spec = registry.find("vuex").unwrap().generator(&DefaultAnswers).unwrap();
        assert!(spec.options.is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut registry = ShortcutRegistry::new();
        let err = registry
            .register("(", "x", "x", Box::new(|_: &dyn Prompter| Ok(GeneratorOptions::new())))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert!(registry.is_empty());
    }
}
