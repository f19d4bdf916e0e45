//! OpenAPI projection for autoroute.
//!
//! Turns resolved endpoints into an OpenAPI 3.0 document.
//!
//! # Example
//!
//! ```
//! use autoroute_core::{ApiRegistry, ConventionConfig, MethodCandidate, TypeDescriptor};
//! use autoroute_openapi::OpenApiBuilder;
//!
//! let registry = ApiRegistry::new()
//!     .candidate(MethodCandidate::new("UserService", "Get").param("id", TypeDescriptor::Integer));
//!
//! let spec = OpenApiBuilder::new()
//!     .title("Users")
//!     .add_registry(&registry, &ConventionConfig::default())
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(spec["paths"]["/api/users/{id}"]["get"]["parameters"][0]["in"], "path");
//! ```

mod builder;
mod error;
mod schema;
mod types;

pub use builder::OpenApiBuilder;
pub use error::OpenApiError;
pub use schema::{openapi_path, type_schema};
pub use types::*;

/// Result type for OpenAPI operations.
pub type Result<T> = std::result::Result<T, OpenApiError>;
