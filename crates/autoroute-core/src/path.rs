//! URL template assembly.
//!
//! A synthesized template is laid out as
//!
//! ```text
//! {route prefix}/{resource}/{primary id}/{action}/{sub-resource id}
//! ```
//!
//! with empty pieces omitted:
//! - `UserService::Get(id)` → `api/users/{id}`
//! - `UserService::Create(input)` → `api/users`
//! - `UserService::GetListByIds(ids)` → `api/users/by-ids`
//! - `UserService::UpdateEditorAsync(id, editorId, input)` → `api/users/{id}/update-editor/{editorId}`
//!
//! Explicit templates may instead use the `[controller]`/`[resource]` and
//! `[action]` tokens, which are replaced with the same cased names.

use crate::config::ConventionConfig;
use crate::model::{MethodCandidate, ParameterInfo};
use crate::naming::{pluralize, strip_prefix, strip_suffix};
use crate::verb::HttpVerb;

const RESOURCE_TOKENS: [&str; 2] = ["controller", "resource"];
const ACTION_TOKEN: &str = "action";
const LIST_WORD: &str = "List";

/// Cased names and path parameters for one candidate under one verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan<'a> {
    /// Cased resource segment (`users`).
    pub resource: String,
    /// Cased action segment, possibly empty.
    pub action: String,
    /// First id-like parameter.
    pub primary: Option<&'a ParameterInfo>,
    /// Second id-like parameter, placed after the action.
    pub sub_resource: Option<&'a ParameterInfo>,
    /// Further id-like parameters, not placed in the template.
    pub ignored: Vec<&'a ParameterInfo>,
}

impl<'a> RoutePlan<'a> {
    pub fn new(config: &ConventionConfig, candidate: &'a MethodCandidate, verb: HttpVerb) -> Self {
        let mut ids = candidate.parameters.iter().filter(|p| p.is_id_like());
        let primary = ids.next();
        let sub_resource = ids.next();
        let ignored: Vec<_> = ids.collect();

        let case = config.url_case();

        let resource = strip_suffix(&candidate.declaring_type, config.type_suffixes());
        let resource = if config.pluralize_resources() {
            pluralize(resource)
        } else {
            resource.to_string()
        };

        let base = strip_suffix(&candidate.method_name, config.action_suffixes());
        let action = if sub_resource.is_some() {
            // The action names the relationship between the two ids.
            base
        } else {
            let action = strip_prefix(base, config.verb_prefixes().prefixes(verb));
            if primary.is_none() && verb == HttpVerb::Get {
                strip_list_word(action)
            } else {
                action
            }
        };

        Self {
            resource: if resource.is_empty() {
                String::new()
            } else {
                case.apply(&resource)
            },
            action: if action.is_empty() {
                String::new()
            } else {
                case.apply(action)
            },
            primary,
            sub_resource,
            ignored,
        }
    }

    /// Names of the parameters placed in a synthesized template.
    pub fn path_parameter_names(&self) -> impl Iterator<Item = &str> {
        self.primary
            .into_iter()
            .chain(self.sub_resource)
            .map(|p| p.name.as_str())
    }

    /// Assemble a template from the naming convention.
    pub fn template(&self, config: &ConventionConfig) -> String {
        let case = config.url_case();
        let mut segments: Vec<String> = config
            .route_prefix()
            .iter()
            .map(|s| case.apply(s))
            .collect();

        segments.push(self.resource.clone());
        if let Some(primary) = self.primary {
            segments.push(placeholder(&primary.name));
        }
        segments.push(self.action.clone());
        if let Some(sub) = self.sub_resource {
            segments.push(placeholder(&sub.name));
        }

        segments.retain(|s| !s.is_empty());
        segments.join("/")
    }

    /// Replace placeholder tokens in an explicit template.
    ///
    /// Returns `None` when the template contains no known token.
    pub fn substitute(&self, template: &str) -> Option<String> {
        let mut out = String::with_capacity(template.len());
        let mut replaced = false;

        for piece in scan_tokens(template) {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Token { raw, name } => match self.token_value(name) {
                    Some(value) => {
                        out.push_str(value);
                        replaced = true;
                    }
                    None => out.push_str(raw),
                },
            }
        }

        replaced.then(|| collapse_segments(&out))
    }

    fn token_value(&self, token: &str) -> Option<&str> {
        match Token::parse(token)? {
            Token::Resource => Some(&self.resource),
            Token::Action => Some(&self.action),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Resource,
    Action,
}

impl Token {
    fn parse(name: &str) -> Option<Self> {
        if RESOURCE_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            Some(Token::Resource)
        } else if name.eq_ignore_ascii_case(ACTION_TOKEN) {
            Some(Token::Action)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'t> {
    Text(&'t str),
    /// A bracketed name; `raw` keeps the brackets.
    Token { raw: &'t str, name: &'t str },
}

/// Split a template into literal text and `[name]` pieces.
///
/// An unterminated `[` is literal text.
fn scan_tokens(template: &str) -> impl Iterator<Item = Piece<'_>> {
    let mut rest = template;
    let mut pending = None;
    std::iter::from_fn(move || {
        if let Some(piece) = pending.take() {
            return Some(piece);
        }
        if rest.is_empty() {
            return None;
        }
        let bounds = rest
            .find('[')
            .and_then(|start| rest[start..].find(']').map(|len| (start, start + len)));
        let Some((start, end)) = bounds else {
            let text = rest;
            rest = "";
            return Some(Piece::Text(text));
        };
        let text = &rest[..start];
        let token = Piece::Token {
            raw: &rest[start..=end],
            name: &rest[start + 1..end],
        };
        rest = &rest[end + 1..];
        if text.is_empty() {
            Some(token)
        } else {
            pending = Some(token);
            Some(Piece::Text(text))
        }
    })
}

/// Strip a leading `List` word from a PascalCase action.
///
/// `ListByIds` → `ByIds` and `List` → empty, but `Listeners` is left alone.
fn strip_list_word(action: &str) -> &str {
    let rest = strip_prefix(action, &[LIST_WORD]);
    if rest.len() == action.len() {
        return action;
    }
    match rest.chars().next() {
        None => rest,
        Some(c) if c.is_ascii_uppercase() || c.is_ascii_digit() => rest,
        Some(_) => action,
    }
}

/// Build the conventional template for `candidate` under `verb`.
pub fn build_template(config: &ConventionConfig, candidate: &MethodCandidate, verb: HttpVerb) -> String {
    RoutePlan::new(config, candidate, verb).template(config)
}

/// Whether `template` contains any placeholder token.
pub fn has_tokens(template: &str) -> bool {
    scan_tokens(template).any(|piece| match piece {
        Piece::Token { name, .. } => Token::parse(name).is_some(),
        Piece::Text(_) => false,
    })
}

/// Parameter names referenced by `{...}` placeholders in a template.
///
/// Understands `{name}`, `{name:constraint}`, `{name=default}`, `{name?}`
/// and catch-all `{*name}` / `{**name}`.
pub fn template_placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let inner = rest[start + 1..start + len].trim_start_matches('*');
        let name = inner
            .split([':', '='])
            .next()
            .unwrap_or_default()
            .trim_end_matches('?');
        if !name.is_empty() {
            names.push(name);
        }
        rest = &rest[start + len + 1..];
    }
    names
}

fn placeholder(name: &str) -> String {
    format!("{{{name}}}")
}

fn collapse_segments(template: &str) -> String {
    let joined = template
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    if template.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TypeDescriptor;
    use crate::naming::UrlCase;

    fn dto() -> TypeDescriptor {
        TypeDescriptor::object("CreateUserDto")
    }

    fn user(method: &str) -> MethodCandidate {
        MethodCandidate::new("UserService", method)
    }

    #[test]
    fn test_get_by_id() {
        let config = ConventionConfig::default();
        let c = user("Get").param("id", TypeDescriptor::Integer);
        assert_eq!(build_template(&config, &c, HttpVerb::Get), "api/users/{id}");
    }

    #[test]
    fn test_create_has_no_trailing_segment() {
        let config = ConventionConfig::default();
        let c = user("Create").param("input", dto());
        assert_eq!(build_template(&config, &c, HttpVerb::Post), "api/users");
    }

    #[test]
    fn test_sub_resource_keeps_action_between_ids() {
        let config = ConventionConfig::default();
        let c = user("UpdateEditorAsync")
            .param("id", TypeDescriptor::Uuid)
            .param("editorId", TypeDescriptor::Uuid)
            .param("input", dto());
        assert_eq!(
            build_template(&config, &c, HttpVerb::Put),
            "api/users/{id}/update-editor/{editorId}"
        );
    }

    #[test]
    fn test_get_list_strips_list_token() {
        let config = ConventionConfig::default();
        assert_eq!(
            build_template(&config, &user("GetList").param("input", dto()), HttpVerb::Get),
            "api/users"
        );
        assert_eq!(
            build_template(&config, &user("GetListAsync").param("input", dto()), HttpVerb::Get),
            "api/users"
        );
        assert_eq!(
            build_template(
                &config,
                &user("GetListByIds").param("ids", TypeDescriptor::array(TypeDescriptor::Integer)),
                HttpVerb::Get
            ),
            "api/users/by-ids"
        );
        // List is only special for GET
        assert_eq!(
            build_template(&config, &user("DeleteList"), HttpVerb::Delete),
            "api/users/list"
        );
    }

    #[test]
    fn test_list_word_boundary() {
        let config = ConventionConfig::default();
        assert_eq!(
            build_template(&config, &user("QueryListeners"), HttpVerb::Get),
            "api/users/listeners"
        );
        assert_eq!(
            build_template(&config, &user("FindListing"), HttpVerb::Get),
            "api/users/listing"
        );
        assert_eq!(
            build_template(&config, &user("GetListByIds"), HttpVerb::Get),
            "api/users/by-ids"
        );
        assert_eq!(
            build_template(&config, &user("SearchList2024"), HttpVerb::Get),
            "api/users/2024"
        );
        assert_eq!(strip_list_word("List"), "");
        assert_eq!(strip_list_word("Lis"), "Lis");
    }

    #[test]
    fn test_action_after_primary_id() {
        let config = ConventionConfig::default();
        let c = user("GetEditorsAsync").param("id", TypeDescriptor::Uuid);
        assert_eq!(build_template(&config, &c, HttpVerb::Get), "api/users/{id}/editors");
    }

    #[test]
    fn test_unmatched_name_becomes_action() {
        let config = ConventionConfig::default();
        let c = user("RevokeAsync").param("input", dto());
        assert_eq!(build_template(&config, &c, HttpVerb::Post), "api/users/revoke");
    }

    #[test]
    fn test_explicit_verb_strips_its_own_prefixes() {
        let config = ConventionConfig::default();
        // GET prefixes do not apply when the verb was pinned to PUT
        let c = user("GetData");
        assert_eq!(build_template(&config, &c, HttpVerb::Put), "api/users/get-data");
        // HEAD has no prefixes at all
        assert_eq!(build_template(&config, &user("Ping"), HttpVerb::Head), "api/users/ping");
    }

    #[test]
    fn test_third_id_is_ignored() {
        let config = ConventionConfig::default();
        let c = user("UpdateEditorMyNameAsync")
            .param("id", TypeDescriptor::Uuid)
            .param("editorId", TypeDescriptor::Uuid)
            .param("subEditorId", TypeDescriptor::Uuid);
        let plan = RoutePlan::new(&config, &c, HttpVerb::Put);
        assert_eq!(plan.ignored.len(), 1);
        assert_eq!(plan.ignored[0].name, "subEditorId");
        assert_eq!(
            plan.template(&config),
            "api/users/{id}/update-editor-my-name/{editorId}"
        );
        assert_eq!(plan.path_parameter_names().collect::<Vec<_>>(), ["id", "editorId"]);
    }

    #[test]
    fn test_custom_prefix_and_case() {
        let config = ConventionConfig::builder()
            .route_prefix(["api", "v2"])
            .url_case(UrlCase::Snake)
            .strip_type_suffix("AppService")
            .build()
            .unwrap();
        let c = MethodCandidate::new("OrderLineAppService", "GetByCustomer")
            .param("customer_id", TypeDescriptor::Integer);
        assert_eq!(
            build_template(&config, &c, HttpVerb::Get),
            "api/v2/order_lines/{customer_id}/by_customer"
        );
    }

    #[test]
    fn test_pluralize_disabled_and_empty_prefix() {
        let config = ConventionConfig::builder()
            .route_prefix(Vec::<String>::new())
            .pluralize_resources(false)
            .build()
            .unwrap();
        let c = MethodCandidate::new("BookService", "GetCurrentUserBooksAsync");
        assert_eq!(
            build_template(&config, &c, HttpVerb::Get),
            "book/current-user-books"
        );
    }

    #[test]
    fn test_token_substitution() {
        let config = ConventionConfig::default();
        let c = user("UpdateEditorMyNameAsync")
            .param("id", TypeDescriptor::Uuid)
            .param("editorId", TypeDescriptor::Uuid)
            .param("subEditorId", TypeDescriptor::Uuid);
        let plan = RoutePlan::new(&config, &c, HttpVerb::Put);
        assert_eq!(
            plan.substitute("api/[controller]/{id:guid}/[action]/{editorId}/my-editor/{subeditorId}"),
            Some(
                "api/users/{id:guid}/update-editor-my-name/{editorId}/my-editor/{subeditorId}"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_substitution_collapses_empty_action() {
        let config = ConventionConfig::default();
        let c = user("Get").param("id", TypeDescriptor::Integer);
        let plan = RoutePlan::new(&config, &c, HttpVerb::Get);
        assert_eq!(
            plan.substitute("/API/[Resource]/[ACTION]/{id}"),
            Some("/API/users/{id}".to_string())
        );
        assert_eq!(plan.substitute("api/users/{id}"), None);
        assert_eq!(plan.substitute("api/[unknown]/x"), None);
    }

    #[test]
    fn test_has_tokens() {
        assert!(has_tokens("api/[controller]"));
        assert!(has_tokens("[Action]"));
        assert!(!has_tokens("api/users/{id}"));
        assert!(!has_tokens("api/[area]/x"));
        assert!(!has_tokens("api/[controller"));
        assert!(has_tokens("api/[area]/[resource]"));
    }

    #[test]
    fn test_has_tokens_agrees_with_substitute() {
        let config = ConventionConfig::default();
        let c = user("Get").param("id", TypeDescriptor::Integer);
        let plan = RoutePlan::new(&config, &c, HttpVerb::Get);
        for template in [
            "api/[controller]",
            "[Action]",
            "api/users/{id}",
            "api/[area]/x",
            "api/[controller",
            "api/]x[/[resource]",
            "",
        ] {
            assert_eq!(has_tokens(template), plan.substitute(template).is_some(), "{template}");
        }
    }

    #[test]
    fn test_scan_tokens_keeps_text() {
        let pieces: Vec<_> = scan_tokens("a/[b]c/[d").collect();
        assert_eq!(
            pieces,
            [
                Piece::Text("a/"),
                Piece::Token { raw: "[b]", name: "b" },
                Piece::Text("c/[d"),
            ]
        );
    }

    #[test]
    fn test_template_placeholders() {
        assert_eq!(
            template_placeholders("api/{id:guid}/{editorId}/{page?}/{sort=asc}/{*rest}"),
            ["id", "editorId", "page", "sort", "rest"]
        );
        assert!(template_placeholders("api/users").is_empty());
    }

    #[test]
    fn test_url_case_idempotent_over_templates() {
        let config = ConventionConfig::default();
        let c = user("GetListByIds");
        let template = build_template(&config, &c, HttpVerb::Get);
        for segment in template.split('/') {
            assert_eq!(config.url_case().apply(segment), segment);
        }
    }
}
