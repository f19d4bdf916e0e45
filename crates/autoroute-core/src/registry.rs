//! Candidate discovery by explicit registration.

use std::any::type_name;

use crate::config::ConventionConfig;
use crate::error::Result;
use crate::model::{MethodCandidate, ResolvedAction};
use crate::resolver::{ConventionResolver, ensure_unique_routes};

/// A service type whose methods are exposed as conventional endpoints.
///
/// Usually implemented with `#[dynamic_api]`, which lists every public
/// method with a `self` receiver.
pub trait DynamicApi {
    /// Describe the methods to expose, in declaration order.
    fn method_candidates() -> Vec<MethodCandidate>;
}

/// Collects candidates from registered services ahead of the resolution pass.
///
/// # Example
///
/// ```
/// use autoroute_core::{ApiRegistry, ConventionConfig, MethodCandidate, TypeDescriptor};
///
/// let registry = ApiRegistry::new()
///     .candidate(MethodCandidate::new("UserService", "Get").param("id", TypeDescriptor::Integer));
///
/// let actions = registry.resolve(&ConventionConfig::default());
/// assert_eq!(actions[0].primary().template, "api/users/{id}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiRegistry {
    types: Vec<&'static str>,
    candidates: Vec<MethodCandidate>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service type. Registering the same type twice is a no-op.
    pub fn register<T: DynamicApi>(mut self) -> Self {
        let name = type_name::<T>();
        if !self.types.contains(&name) {
            self.types.push(name);
            self.candidates.extend(T::method_candidates());
        }
        self
    }

    /// Add a hand-built candidate.
    pub fn candidate(mut self, candidate: MethodCandidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Add hand-built candidates.
    pub fn candidates<I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = MethodCandidate>,
    {
        self.candidates.extend(candidates);
        self
    }

    pub fn method_candidates(&self) -> &[MethodCandidate] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Run the resolution pass over everything registered.
    pub fn resolve(&self, config: &ConventionConfig) -> Vec<ResolvedAction> {
        ConventionResolver::new(config).resolve_all(&self.candidates)
    }

    /// Run the resolution pass and reject duplicate routes.
    pub fn resolve_checked(&self, config: &ConventionConfig) -> Result<Vec<ResolvedAction>> {
        let actions = self.resolve(config);
        ensure_unique_routes(&actions)?;
        Ok(actions)
    }
}
