//! Name transformation: affix stripping, pluralization and URL casing.

use std::fmt;
use std::sync::Arc;

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase};

use crate::error::{ConventionError, Result};

/// ASCII case-insensitive `starts_with`.
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// ASCII case-insensitive `ends_with`.
pub fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Remove the first matching suffix from `name` (case-insensitive).
///
/// At most one suffix is removed; `name` is returned unchanged if none match.
pub fn strip_suffix<'a, S: AsRef<str>>(name: &'a str, suffixes: &[S]) -> &'a str {
    for suffix in suffixes {
        let suffix = suffix.as_ref();
        if !suffix.is_empty() && ends_with_ignore_case(name, suffix) {
            return &name[..name.len() - suffix.len()];
        }
    }
    name
}

/// Remove the first matching prefix from `name` (case-insensitive).
///
/// At most one prefix is removed; `name` is returned unchanged if none match.
pub fn strip_prefix<'a, S: AsRef<str>>(name: &'a str, prefixes: &[S]) -> &'a str {
    for prefix in prefixes {
        let prefix = prefix.as_ref();
        if !prefix.is_empty() && starts_with_ignore_case(name, prefix) {
            return &name[prefix.len()..];
        }
    }
    name
}

/// English plural of a PascalCase resource name (`User` → `Users`).
///
/// Names already ending in `s` are left alone.
pub fn pluralize(name: &str) -> String {
    if name.is_empty() || name.ends_with(['s', 'S']) {
        return name.to_string();
    }

    let lower = name.to_ascii_lowercase();
    if lower.ends_with('x') || lower.ends_with('z') || lower.ends_with("ch") || lower.ends_with("sh")
    {
        return format!("{name}es");
    }

    if let Some(stem) = lower.strip_suffix('y') {
        let consonant_before = stem
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_alphabetic() && !"aeiou".contains(c));
        if consonant_before {
            return format!("{}ies", &name[..name.len() - 1]);
        }
    }

    format!("{name}s")
}

type CaseFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Casing applied to every literal URL segment.
///
/// Custom functions must be deterministic and idempotent
/// (`f(f(x)) == f(x)`); the built-in styles are.
#[derive(Clone, Default)]
pub enum UrlCase {
    /// `GetListByIds` → `get-list-by-ids`
    #[default]
    Kebab,
    /// `GetListByIds` → `get_list_by_ids`
    Snake,
    /// `GetListByIds` → `getListByIds`
    Camel,
    /// `GetListByIds` → `getlistbyids`
    Lower,
    Custom(CaseFn),
}

impl UrlCase {
    /// Wrap an arbitrary case function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        UrlCase::Custom(Arc::new(f))
    }

    /// Look up a built-in style by name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "kebab" | "kebab-case" => Ok(UrlCase::Kebab),
            "snake" | "snake_case" => Ok(UrlCase::Snake),
            "camel" | "camelcase" => Ok(UrlCase::Camel),
            "lower" | "lowercase" => Ok(UrlCase::Lower),
            _ => Err(ConventionError::UnknownUrlCase {
                value: name.to_string(),
            }),
        }
    }

    pub fn apply(&self, segment: &str) -> String {
        match self {
            UrlCase::Kebab => segment.to_kebab_case(),
            UrlCase::Snake => segment.to_snake_case(),
            UrlCase::Camel => segment.to_lower_camel_case(),
            UrlCase::Lower => segment.to_lowercase(),
            UrlCase::Custom(f) => f(segment),
        }
    }
}

impl fmt::Debug for UrlCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlCase::Kebab => f.write_str("Kebab"),
            UrlCase::Snake => f.write_str("Snake"),
            UrlCase::Camel => f.write_str("Camel"),
            UrlCase::Lower => f.write_str("Lower"),
            UrlCase::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix("UserService", &["Service"]), "User");
        assert_eq!(strip_suffix("UserSERVICE", &["service"]), "User");
        assert_eq!(strip_suffix("UserRepo", &["Service"]), "UserRepo");
        // only the first match, only once
        assert_eq!(
            strip_suffix("AuditServiceService", &["Service", "ServiceService"]),
            "AuditService"
        );
        assert_eq!(strip_suffix("Service", &["Service"]), "");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("GetListByIds", &["GetList", "Get"]), "ByIds");
        assert_eq!(strip_prefix("getUser", &["Get"]), "User");
        assert_eq!(strip_prefix("Import", &["Get"]), "Import");
        assert_eq!(strip_prefix("Get", &["Get"]), "");
    }

    #[test]
    fn test_strip_then_reattach_round_trips() {
        for name in ["UserService", "BookAppService", "Service"] {
            let stripped = strip_suffix(name, &["Service"]);
            assert_eq!(format!("{stripped}Service"), name);
        }
        for name in ["GetUser", "GetListByIds", "Get"] {
            let stripped = strip_prefix(name, &["Get"]);
            assert_eq!(format!("Get{stripped}"), name);
        }
    }

    #[test]
    fn test_ignore_case_helpers_respect_char_boundaries() {
        assert!(!starts_with_ignore_case("é", "e"));
        assert!(!ends_with_ignore_case("aé", "e"));
        assert!(ends_with_ignore_case("editorId", "ID"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("User"), "Users");
        assert_eq!(pluralize("Users"), "Users");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Branch"), "Branches");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_url_case_styles() {
        assert_eq!(UrlCase::Kebab.apply("GetListByIds"), "get-list-by-ids");
        assert_eq!(UrlCase::Snake.apply("GetListByIds"), "get_list_by_ids");
        assert_eq!(UrlCase::Camel.apply("GetListByIds"), "getListByIds");
        assert_eq!(UrlCase::Lower.apply("GetListByIds"), "getlistbyids");
        assert_eq!(UrlCase::custom(|s| s.to_uppercase()).apply("api"), "API");
    }

    #[test]
    fn test_url_case_is_idempotent() {
        let samples = ["UserService", "ByIds", "update-editor", "api", "v2Beta", "HTMLPage"];
        for case in [UrlCase::Kebab, UrlCase::Snake, UrlCase::Camel, UrlCase::Lower] {
            for s in samples {
                let once = case.apply(s);
                assert_eq!(case.apply(&once), once, "{case:?} on {s}");
            }
        }
    }

    #[test]
    fn test_url_case_from_name() {
        assert!(matches!(UrlCase::from_name("Kebab").unwrap(), UrlCase::Kebab));
        assert!(matches!(UrlCase::from_name("snake_case").unwrap(), UrlCase::Snake));
        assert!(matches!(
            UrlCase::from_name("train"),
            Err(ConventionError::UnknownUrlCase { value }) if value == "train"
        ));
    }
}
