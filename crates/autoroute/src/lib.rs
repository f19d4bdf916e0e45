//! Autoroute - REST endpoints from plain service methods
//!
//! Autoroute takes an **impl-first** approach: write ordinary service
//! methods, and a naming convention decides each one's HTTP verb, URL
//! template and parameter binding sources. The result is a route table a
//! web framework can mount.
//!
//! # Quick Start
//!
//! ```
//! use autoroute::prelude::*;
//!
//! pub struct UserService;
//! pub struct CreateUserDto;
//!
//! #[dynamic_api]
//! impl UserService {
//!     pub fn get(&self, id: u64) {}
//!     pub fn create(&self, input: CreateUserDto) {}
//!     pub fn update_editor_async(&self, id: u64, editor_id: u64, input: CreateUserDto) {}
//! }
//!
//! let actions = ApiRegistry::new()
//!     .register::<UserService>()
//!     .resolve_checked(&ConventionConfig::default())
//!     .unwrap();
//!
//! assert_eq!(actions[0].primary().template, "api/users/{id}");
//! assert_eq!(actions[1].primary().verb, HttpVerb::Post);
//! assert_eq!(actions[2].primary().template, "api/users/{id}/update-editor/{editor_id}");
//! ```
//!
//! # Naming Conventions
//!
//! Method names are matched in PascalCase (`get_list_async` is `GetListAsync`).
//! The longest matching prefix picks the verb:
//!
//! | Prefixes | Verb |
//! |----------|------|
//! | `GetList`, `GetAll`, `Get`, `Query`, `Search`, `Find`, `Fetch` | GET |
//! | `Create`, `Save`, `Insert`, `Add`, `Post` | POST |
//! | `Put`, `Update`, `Edit` | PUT |
//! | `Delete`, `Remove` | DELETE |
//! | `Patch` | PATCH |
//!
//! Anything else is POST.
//!
//! # Templates
//!
//! `{route prefix}/{resource}/{id}/{action}/{sub id}`, with empty pieces
//! dropped. The resource is the type name without its `Service` suffix,
//! pluralized and kebab-cased. The action is the method name without its
//! verb prefix and `Async` suffix.
//!
//! # Features
//!
//! - `openapi`: [`OpenApiBuilder`] for projecting endpoints into OpenAPI 3.0
//! - `config`: [`ConventionConfig::from_toml_file`] for convention files

pub use autoroute_core::{
    ApiRegistry, BindingSource, ConventionConfig, ConventionConfigBuilder, ConventionError,
    ConventionResolver, DynamicApi, EndpointDescriptor, ExistingSelector, HttpVerb,
    MethodCandidate, ParameterBinding, ParameterInfo, ResolvedAction, Result, RoutePlan,
    TemplateSource, TypeDescriptor, TypeKind, UrlCase, VerbPrefixMap, build_template, classify,
    decide_binding, ensure_unique_routes, has_tokens, pluralize, resolve_verb, strip_prefix,
    strip_suffix, template_placeholders,
};

pub use autoroute_macros::dynamic_api;

// Re-export for host code that ships candidates as JSON
pub use serde;
pub use serde_json;

#[cfg(feature = "openapi")]
pub use autoroute_openapi::{OpenApiBuilder, OpenApiError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::dynamic_api;
    pub use super::{
        ApiRegistry, BindingSource, ConventionConfig, ConventionResolver, DynamicApi, HttpVerb,
        MethodCandidate, ResolvedAction, TypeDescriptor,
    };

    #[cfg(feature = "openapi")]
    pub use super::OpenApiBuilder;
}
