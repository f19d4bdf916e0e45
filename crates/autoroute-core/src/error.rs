//! Error types for convention configuration and route validation.

use thiserror::Error;

/// Errors raised while building a [`ConventionConfig`](crate::ConventionConfig)
/// or validating a resolved route table.
///
/// Resolution itself never fails. Everything here is a startup-time fault that
/// should abort the application before it begins serving requests.
#[derive(Debug, Error)]
pub enum ConventionError {
    /// A verb name that is not one of the supported HTTP methods.
    #[error("Unknown HTTP verb '{verb}': expected one of GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS")]
    UnknownVerb { verb: String },

    /// An empty or whitespace-only name prefix would match every method.
    #[error("Blank name prefix registered for verb {verb}")]
    BlankPrefix { verb: String },

    /// An empty or whitespace-only entry in a suffix list.
    #[error("Blank entry in option '{option}'")]
    BlankAffix { option: &'static str },

    /// A route prefix segment that cannot appear literally in a URL template.
    #[error("Invalid route prefix segment '{segment}': segments must not contain '{{', '}}' or whitespace")]
    InvalidRouteSegment { segment: String },

    /// A named URL case style that does not exist.
    #[error("Unknown url_case '{value}': expected one of kebab, snake, camel, lower")]
    UnknownUrlCase { value: String },

    /// Two endpoints resolve to the same verb and route shape.
    #[error(
        "Duplicate route: {verb} {template} (from {method}) is structurally identical to {existing_template} (from {existing_method})"
    )]
    DuplicateRoute {
        verb: String,
        template: String,
        method: String,
        existing_template: String,
        existing_method: String,
    },

    /// Invalid TOML in a convention config file.
    #[cfg(feature = "config")]
    #[error("Invalid convention config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A convention config file could not be read.
    #[cfg(feature = "config")]
    #[error("Failed to read convention config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for convention operations.
pub type Result<T> = std::result::Result<T, ConventionError>;
