//! Parameter type classification.
//!
//! Simple values can be bound from the path or query string; complex values
//! need a request body.

use serde::{Deserialize, Serialize};

/// Host-supplied description of a parameter's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Bool,
    Char,
    Integer,
    Float,
    Decimal,
    String,
    /// Dates, times, instants and durations.
    DateTime,
    Uuid,
    /// A fieldless enumeration, by name.
    Enum(String),
    /// `Option<T>` / `T?`
    Nullable(Box<TypeDescriptor>),
    /// Arrays, slices, lists and sets.
    Array(Box<TypeDescriptor>),
    Tuple(Vec<TypeDescriptor>),
    /// Any other named type (DTOs, records, maps).
    Object(String),
}

impl TypeDescriptor {
    pub fn nullable(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Nullable(Box::new(inner))
    }

    pub fn array(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(elem))
    }

    pub fn object(name: impl Into<String>) -> Self {
        TypeDescriptor::Object(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        TypeDescriptor::Enum(name.into())
    }

    /// Classify this type. See [`classify`].
    pub fn kind(&self) -> TypeKind {
        classify(self)
    }
}

/// Result of classifying a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Simple,
    Complex,
}

/// Decide whether a type is simple (path/query bindable) or complex (body).
///
/// Tuples are complex even when every element is simple, since they need
/// structured binding.
pub fn classify(ty: &TypeDescriptor) -> TypeKind {
    match ty {
        TypeDescriptor::Bool
        | TypeDescriptor::Char
        | TypeDescriptor::Integer
        | TypeDescriptor::Float
        | TypeDescriptor::Decimal
        | TypeDescriptor::String
        | TypeDescriptor::DateTime
        | TypeDescriptor::Uuid
        | TypeDescriptor::Enum(_) => TypeKind::Simple,
        TypeDescriptor::Nullable(inner) | TypeDescriptor::Array(inner) => classify(inner),
        TypeDescriptor::Tuple(_) | TypeDescriptor::Object(_) => TypeKind::Complex,
    }
}
