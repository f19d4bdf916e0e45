//! Immutable convention configuration and its builder.

use crate::error::{ConventionError, Result};
use crate::naming::UrlCase;
use crate::verb::{HttpVerb, VerbPrefixMap};

/// Process-wide convention settings.
///
/// Built once at startup (via [`ConventionConfig::builder`] or
/// [`Default`]) and passed by reference through the resolution pass.
///
/// # Example
///
/// ```
/// use autoroute_core::{ConventionConfig, HttpVerb, UrlCase};
///
/// let config = ConventionConfig::builder()
///     .route_prefix(["api/v1"])
///     .strip_type_suffix("AppService")
///     .verb_prefixes(HttpVerb::Get, ["Load"])
///     .url_case(UrlCase::Snake)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.route_prefix(), ["api", "v1"]);
/// ```
#[derive(Debug, Clone)]
pub struct ConventionConfig {
    verb_prefixes: VerbPrefixMap,
    type_suffixes: Vec<String>,
    action_suffixes: Vec<String>,
    route_prefix: Vec<String>,
    url_case: UrlCase,
    pluralize_resources: bool,
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            verb_prefixes: VerbPrefixMap::default(),
            type_suffixes: vec!["Service".to_string()],
            action_suffixes: vec!["Async".to_string()],
            route_prefix: vec!["api".to_string()],
            url_case: UrlCase::Kebab,
            pluralize_resources: true,
        }
    }
}

impl ConventionConfig {
    /// Start from the defaults.
    pub fn builder() -> ConventionConfigBuilder {
        ConventionConfigBuilder {
            config: Self::default(),
        }
    }

    pub fn verb_prefixes(&self) -> &VerbPrefixMap {
        &self.verb_prefixes
    }

    /// Suffixes removed from the declaring type name (`UserService` → `User`).
    pub fn type_suffixes(&self) -> &[String] {
        &self.type_suffixes
    }

    /// Suffixes removed from method names before building the action segment.
    pub fn action_suffixes(&self) -> &[String] {
        &self.action_suffixes
    }

    /// Literal segments prepended to every synthesized route.
    pub fn route_prefix(&self) -> &[String] {
        &self.route_prefix
    }

    pub fn url_case(&self) -> &UrlCase {
        &self.url_case
    }

    pub fn pluralize_resources(&self) -> bool {
        self.pluralize_resources
    }
}

/// Builder for [`ConventionConfig`].
#[derive(Debug, Clone)]
pub struct ConventionConfigBuilder {
    config: ConventionConfig,
}

impl ConventionConfigBuilder {
    /// Add name prefixes for a verb (add-if-absent, longest first).
    pub fn verb_prefixes<I, S>(mut self, verb: HttpVerb, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.verb_prefixes.add_if_absent(verb, prefixes);
        self
    }

    /// Start from an empty verb map instead of the defaults.
    pub fn without_default_verbs(mut self) -> Self {
        self.config.verb_prefixes = VerbPrefixMap::empty();
        self
    }

    /// Replace the whole verb map.
    pub fn verb_prefix_map(mut self, map: VerbPrefixMap) -> Self {
        self.config.verb_prefixes = map;
        self
    }

    /// Replace the type suffixes.
    pub fn type_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.type_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Add one type suffix (tried before the existing ones).
    pub fn strip_type_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        if !self
            .config
            .type_suffixes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&suffix))
        {
            self.config.type_suffixes.insert(0, suffix);
        }
        self
    }

    /// Replace the action suffixes.
    pub fn action_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.action_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the route prefix. Entries containing `/` are split into segments.
    pub fn route_prefix<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.route_prefix = segments
            .into_iter()
            .flat_map(|s| {
                s.as_ref()
                    .split('/')
                    .filter(|seg| !seg.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        self
    }

    pub fn url_case(mut self, url_case: UrlCase) -> Self {
        self.config.url_case = url_case;
        self
    }

    pub fn pluralize_resources(mut self, pluralize: bool) -> Self {
        self.config.pluralize_resources = pluralize;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<ConventionConfig> {
        let config = self.config;

        for (verb, prefixes) in config.verb_prefixes.iter() {
            if prefixes.iter().any(|p| p.trim().is_empty()) {
                return Err(ConventionError::BlankPrefix {
                    verb: verb.to_string(),
                });
            }
        }
        if config.type_suffixes.iter().any(|s| s.trim().is_empty()) {
            return Err(ConventionError::BlankAffix {
                option: "type_suffixes",
            });
        }
        if config.action_suffixes.iter().any(|s| s.trim().is_empty()) {
            return Err(ConventionError::BlankAffix {
                option: "action_suffixes",
            });
        }
        if let Some(segment) = config
            .route_prefix
            .iter()
            .find(|s| s.contains(['{', '}']) || s.chars().any(char::is_whitespace))
        {
            return Err(ConventionError::InvalidRouteSegment {
                segment: segment.clone(),
            });
        }

        Ok(config)
    }
}

#[cfg(feature = "config")]
mod file {
    use std::path::Path;

    use serde::Deserialize;

    use super::{ConventionConfig, ConventionConfigBuilder};
    use crate::error::{ConventionError, Result};
    use crate::naming::UrlCase;
    use crate::verb::HttpVerb;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ConventionFile {
        #[serde(default = "default_true")]
        inherit_verbs: bool,
        route_prefix: Option<Vec<String>>,
        type_suffixes: Option<Vec<String>>,
        action_suffixes: Option<Vec<String>>,
        url_case: Option<String>,
        pluralize: Option<bool>,
        #[serde(default)]
        verbs: Vec<VerbEntry>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct VerbEntry {
        verb: String,
        prefixes: Vec<String>,
    }

    fn default_true() -> bool {
        true
    }

    impl ConventionConfig {
        /// Load a configuration from TOML. Omitted keys keep their defaults.
        ///
        /// ```toml
        /// inherit_verbs = true
        /// route_prefix = ["api"]
        /// url_case = "kebab"
        ///
        /// [[verbs]]
        /// verb = "GET"
        /// prefixes = ["Load"]
        /// ```
        pub fn from_toml_str(s: &str) -> Result<Self> {
            let file: ConventionFile = toml::from_str(s)?;
            file.into_builder()?.build()
        }

        /// Load a configuration from a TOML file on disk.
        pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let contents = std::fs::read_to_string(path).map_err(|source| ConventionError::Io {
                path: path.display().to_string(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "loading convention config");
            Self::from_toml_str(&contents)
        }
    }

    impl ConventionFile {
        fn into_builder(self) -> Result<ConventionConfigBuilder> {
            let mut builder = ConventionConfig::builder();
            if !self.inherit_verbs {
                builder = builder.without_default_verbs();
            }
            for entry in self.verbs {
                let verb: HttpVerb = entry.verb.parse()?;
                builder = builder.verb_prefixes(verb, entry.prefixes);
            }
            if let Some(prefix) = self.route_prefix {
                builder = builder.route_prefix(prefix);
            }
            if let Some(suffixes) = self.type_suffixes {
                builder = builder.type_suffixes(suffixes);
            }
            if let Some(suffixes) = self.action_suffixes {
                builder = builder.action_suffixes(suffixes);
            }
            if let Some(name) = self.url_case {
                builder = builder.url_case(UrlCase::from_name(&name)?);
            }
            if let Some(pluralize) = self.pluralize {
                builder = builder.pluralize_resources(pluralize);
            }
            Ok(builder)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConventionConfig::default();
        assert_eq!(config.type_suffixes(), ["Service"]);
        assert_eq!(config.action_suffixes(), ["Async"]);
        assert_eq!(config.route_prefix(), ["api"]);
        assert!(matches!(config.url_case(), UrlCase::Kebab));
        assert!(config.pluralize_resources());
        assert_eq!(config.verb_prefixes(), &VerbPrefixMap::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConventionConfig::builder()
            .route_prefix(["/api/v2/", "internal"])
            .strip_type_suffix("AppService")
            .strip_type_suffix("service")
            .action_suffixes(Vec::<String>::new())
            .verb_prefixes(HttpVerb::Delete, ["Purge"])
            .pluralize_resources(false)
            .build()
            .unwrap();

        assert_eq!(config.route_prefix(), ["api", "v2", "internal"]);
        assert_eq!(config.type_suffixes(), ["AppService", "Service"]);
        assert!(config.action_suffixes().is_empty());
        assert_eq!(
            config.verb_prefixes().prefixes(HttpVerb::Delete),
            ["Delete", "Remove", "Purge"]
        );
        assert!(!config.pluralize_resources());
    }

    #[test]
    fn test_without_default_verbs() {
        let config = ConventionConfig::builder()
            .without_default_verbs()
            .verb_prefixes(HttpVerb::Get, ["Read"])
            .build()
            .unwrap();
        assert_eq!(config.verb_prefixes().iter().count(), 1);
        assert!(config.verb_prefixes().prefixes(HttpVerb::Post).is_empty());
    }

    #[test]
    fn test_blank_prefix_rejected() {
        let err = ConventionConfig::builder()
            .verb_prefixes(HttpVerb::Put, [" "])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConventionError::BlankPrefix { verb } if verb == "PUT"));
    }

    #[test]
    fn test_blank_suffix_rejected() {
        let err = ConventionConfig::builder()
            .type_suffixes(["Service", ""])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConventionError::BlankAffix {
                option: "type_suffixes"
            }
        ));
    }

    #[test]
    fn test_invalid_route_segment_rejected() {
        let err = ConventionConfig::builder()
            .route_prefix(["api", "{tenant}"])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConventionError::InvalidRouteSegment { segment } if segment == "{tenant}"));

        let err = ConventionConfig::builder()
            .route_prefix(["my api"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("'my api'"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConventionConfig>();
    }

    #[cfg(feature = "config")]
    mod toml_loading {
        use super::*;
        use std::io::Write;

        #[test]
        fn test_from_toml_str() {
            let config = ConventionConfig::from_toml_str(
                r#"
                route_prefix = ["api", "v1"]
                type_suffixes = ["AppService", "Service"]
                url_case = "snake"
                pluralize = false

                [[verbs]]
                verb = "get"
                prefixes = ["Load"]
                "#,
            )
            .unwrap();

            assert_eq!(config.route_prefix(), ["api", "v1"]);
            assert_eq!(config.type_suffixes(), ["AppService", "Service"]);
            assert!(matches!(config.url_case(), UrlCase::Snake));
            assert!(!config.pluralize_resources());
            assert!(
                config
                    .verb_prefixes()
                    .prefixes(HttpVerb::Get)
                    .contains(&"Load".to_string())
            );
            // untouched keys keep defaults
            assert_eq!(config.action_suffixes(), ["Async"]);
        }

        #[test]
        fn test_empty_toml_is_default() {
            let config = ConventionConfig::from_toml_str("").unwrap();
            assert_eq!(config.route_prefix(), ["api"]);
            assert_eq!(config.verb_prefixes(), &VerbPrefixMap::default());
        }

        #[test]
        fn test_inherit_verbs_false() {
            let config = ConventionConfig::from_toml_str(
                r#"
                inherit_verbs = false
                [[verbs]]
                verb = "DELETE"
                prefixes = ["Drop"]
                "#,
            )
            .unwrap();
            assert_eq!(config.verb_prefixes().prefixes(HttpVerb::Delete), ["Drop"]);
            assert!(config.verb_prefixes().prefixes(HttpVerb::Get).is_empty());
        }

        #[test]
        fn test_unknown_verb_in_toml() {
            let err = ConventionConfig::from_toml_str(
                r#"
                [[verbs]]
                verb = "FETCH"
                prefixes = ["Fetch"]
                "#,
            )
            .unwrap_err();
            assert!(matches!(err, ConventionError::UnknownVerb { verb } if verb == "FETCH"));
        }

        #[test]
        fn test_unknown_key_in_toml() {
            let err = ConventionConfig::from_toml_str("route_prefixes = [\"api\"]").unwrap_err();
            assert!(matches!(err, ConventionError::Toml(_)));
        }

        #[test]
        fn test_from_toml_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "url_case = \"lower\"").unwrap();
            let config = ConventionConfig::from_toml_file(file.path()).unwrap();
            assert!(matches!(config.url_case(), UrlCase::Lower));
        }

        #[test]
        fn test_missing_file() {
            let err = ConventionConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
            assert!(matches!(err, ConventionError::Io { .. }));
        }
    }
}
