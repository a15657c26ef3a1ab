//! Plugin identifier convention.
//!
//! Short names expand to installable package names:
//!
//! | requested | installed |
//! |---|---|
//! | `eslint` (official) | `@vue/cli-plugin-eslint` |
//! | `@vue/foo` | `@vue/cli-plugin-foo` |
//! | `@acme/foo` | `@acme/vue-cli-plugin-foo` |
//! | `foo` | `vue-cli-plugin-foo` |
//!
//! Full identifiers are returned unchanged.

/// Short names of the plugins published under the official scope.
pub const OFFICIAL_PLUGINS: [&str; 12] = [
    "babel",
    "e2e-cypress",
    "e2e-nightwatch",
    "e2e-webdriverio",
    "eslint",
    "pwa",
    "router",
    "typescript",
    "unit-jest",
    "unit-mocha",
    "vuex",
    "webpack-4",
];

/// Scope, prefixes and official list that define plugin package names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    /// Official scope including the `@`, e.g. `@vue`.
    pub official_scope: String,
    /// Prefix of official plugins inside the official scope.
    pub official_prefix: String,
    /// Prefix of community plugins, scoped or not.
    pub community_prefix: String,
    /// The service package, never rewritten.
    pub service_package: String,
    pub official_plugins: Vec<String>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            official_scope: "@vue".to_string(),
            official_prefix: "cli-plugin-".to_string(),
            community_prefix: "vue-cli-plugin-".to_string(),
            service_package: "@vue/cli-service".to_string(),
            official_plugins: OFFICIAL_PLUGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NamingConvention {
    /// Whether `id` is already a full plugin package name.
    pub fn is_plugin(&self, id: &str) -> bool {
        match split_scope(id) {
            Some((scope, rest)) if scope == self.official_scope => {
                rest.starts_with(&self.official_prefix)
            }
            Some((_, rest)) => rest.starts_with(&self.community_prefix),
            None => id.starts_with(&self.community_prefix),
        }
    }

    /// Whether `id` is a full plugin name under the official scope.
    pub fn is_official_plugin(&self, id: &str) -> bool {
        self.is_plugin(id) && split_scope(id).is_some_and(|(scope, _)| scope == self.official_scope)
    }

    /// Expand `id` to its installable package name.
    pub fn resolve_plugin_id(&self, id: &str) -> String {
        if self.is_plugin(id) || id == self.service_package {
            return id.to_string();
        }
        if self.official_plugins.iter().any(|name| name == id) {
            return format!("{}/{}{id}", self.official_scope, self.official_prefix);
        }
        if let Some((scope, short)) = split_scope(id) {
            let prefix = if scope == self.official_scope {
                &self.official_prefix
            } else {
                &self.community_prefix
            };
            return format!("{scope}/{prefix}{short}");
        }
        format!("{}{id}", self.community_prefix)
    }
}

/// Split `@scope/rest` into `("@scope", "rest")`.
fn split_scope(id: &str) -> Option<(&str, &str)> {
    if !id.starts_with('@') {
        return None;
    }
    let (scope, rest) = id.split_once('/')?;
    let valid = scope.len() > 1
        && scope[1..]
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    valid.then_some((scope, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("eslint", "@vue/cli-plugin-eslint")]
    #[case("router", "@vue/cli-plugin-router")]
    #[case("foo", "vue-cli-plugin-foo")]
    #[case("@vue/foo", "@vue/cli-plugin-foo")]
    #[case("@acme/foo", "@acme/vue-cli-plugin-foo")]
    #[case("@my.org/foo", "@my.org/vue-cli-plugin-foo")]
    #[case("vue-cli-plugin-foo", "vue-cli-plugin-foo")]
    #[case("@vue/cli-plugin-babel", "@vue/cli-plugin-babel")]
    #[case("@acme/vue-cli-plugin-foo", "@acme/vue-cli-plugin-foo")]
    #[case("@vue/cli-service", "@vue/cli-service")]
    fn test_resolve_plugin_id(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(NamingConvention::default().resolve_plugin_id(id), expected);
    }

    #[test]
    fn test_is_official_plugin() {
        let naming = NamingConvention::default();
        assert!(naming.is_official_plugin("@vue/cli-plugin-eslint"));
        assert!(!naming.is_official_plugin("vue-cli-plugin-foo"));
        assert!(!naming.is_official_plugin("@acme/vue-cli-plugin-foo"));
        assert!(!naming.is_official_plugin("@vue/cli-service"));
    }

    #[test]
    fn test_resolved_short_names_are_plugins() {
        let naming = NamingConvention::default();
        for id in ["eslint", "foo", "@vue/foo", "@acme/foo"] {
            assert!(naming.is_plugin(&naming.resolve_plugin_id(id)), "{id}");
        }
    }

    #[test]
    fn test_custom_convention() {
        let naming = NamingConvention {
            official_scope: "@webchain".into(),
            official_prefix: "plugin-".into(),
            community_prefix: "webchain-plugin-".into(),
            service_package: "@webchain/service".into(),
            official_plugins: vec!["lint".into()],
        };
        assert_eq!(naming.resolve_plugin_id("lint"), "@webchain/plugin-lint");
        assert_eq!(naming.resolve_plugin_id("extra"), "webchain-plugin-extra");
    }
}
