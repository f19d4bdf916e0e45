//! Convention engine for autoroute.
//!
//! Derives REST endpoints (verb, URL template, parameter binding sources) from
//! plain service method signatures. The host supplies [`MethodCandidate`]s, and
//! [`ConventionResolver`] hands back [`ResolvedAction`]s.
//!
//! ```
//! use autoroute_core::{
//!     BindingSource, ConventionConfig, ConventionResolver, HttpVerb, MethodCandidate,
//!     TypeDescriptor,
//! };
//!
//! let config = ConventionConfig::default();
//! let candidate = MethodCandidate::new("UserService", "UpdateEditorAsync")
//!     .param("id", TypeDescriptor::Uuid)
//!     .param("editorId", TypeDescriptor::Uuid)
//!     .param("input", TypeDescriptor::object("CreateUserDto"));
//!
//! let action = ConventionResolver::new(&config).resolve(&candidate);
//! let endpoint = action.primary();
//! assert_eq!(endpoint.verb, HttpVerb::Put);
//! assert_eq!(endpoint.template, "api/users/{id}/update-editor/{editorId}");
//! assert_eq!(endpoint.binding("input"), Some(BindingSource::Body));
//! ```

mod classify;
mod config;
mod error;
mod model;
mod naming;
mod path;
mod registry;
mod resolver;
mod verb;

pub use classify::{TypeDescriptor, TypeKind, classify};
pub use config::{ConventionConfig, ConventionConfigBuilder};
pub use error::{ConventionError, Result};
pub use model::{
    BindingSource, EndpointDescriptor, ExistingSelector, MethodCandidate, ParameterBinding,
    ParameterInfo, ResolvedAction, TemplateSource,
};
pub use naming::{UrlCase, pluralize, strip_prefix, strip_suffix};
pub use path::{RoutePlan, build_template, has_tokens, template_placeholders};
pub use registry::{ApiRegistry, DynamicApi};
pub use resolver::{ConventionResolver, decide_binding, ensure_unique_routes};
pub use verb::{HttpVerb, VerbPrefixMap, resolve_verb};
