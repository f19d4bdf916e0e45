//! Candidate (input) and endpoint (output) descriptors.

use serde::{Deserialize, Serialize};

use crate::classify::TypeDescriptor;
use crate::verb::HttpVerb;

/// Where a parameter's value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingSource {
    Path,
    Body,
    Query,
    /// Only ever set explicitly.
    Header,
}

/// One parameter of a candidate method, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub ty: TypeDescriptor,
    /// Binding source already declared by the host; never overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<BindingSource>,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            binding: None,
        }
    }

    pub fn with_binding(mut self, binding: BindingSource) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Whether the name looks like an identifier (`id`, `editorId`, `user_id`).
    pub fn is_id_like(&self) -> bool {
        crate::naming::ends_with_ignore_case(&self.name, "id")
    }
}

/// A selector that already exists on the candidate (explicit route metadata).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<HttpVerb>,
    /// Other host metadata (auth policies, produces/consumes) hanging off the selector.
    #[serde(default)]
    pub has_other_metadata: bool,
}

impl ExistingSelector {
    /// A selector with an explicit route template.
    pub fn template(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            ..Default::default()
        }
    }

    /// A selector that only pins the verb.
    pub fn verb(verb: HttpVerb) -> Self {
        Self {
            verb: Some(verb),
            ..Default::default()
        }
    }

    pub fn with_verb(mut self, verb: HttpVerb) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn with_other_metadata(mut self) -> Self {
        self.has_other_metadata = true;
        self
    }

    /// Carries no template, no verb and no other metadata.
    pub fn is_empty(&self) -> bool {
        self.template.as_deref().is_none_or(|t| t.trim().is_empty())
            && self.verb.is_none()
            && !self.has_other_metadata
    }
}

/// A discovered service method that should become an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCandidate {
    pub declaring_type: String,
    pub method_name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
    #[serde(default)]
    pub selectors: Vec<ExistingSelector>,
}

impl MethodCandidate {
    pub fn new(declaring_type: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            method_name: method_name.into(),
            parameters: Vec::new(),
            selectors: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(ParameterInfo::new(name, ty));
        self
    }

    /// Append a fully specified parameter.
    pub fn with_parameter(mut self, param: ParameterInfo) -> Self {
        self.parameters.push(param);
        self
    }

    /// Append an existing selector.
    pub fn selector(mut self, selector: ExistingSelector) -> Self {
        self.selectors.push(selector);
        self
    }

    /// Explicit verbs across all selectors, first occurrence order, deduplicated.
    pub fn explicit_verbs(&self) -> Vec<HttpVerb> {
        let mut verbs = Vec::new();
        for verb in self.selectors.iter().filter_map(|s| s.verb) {
            if !verbs.contains(&verb) {
                verbs.push(verb);
            }
        }
        verbs
    }
}

/// How an endpoint's template came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    /// Built from the naming convention.
    Synthesized,
    /// Explicit template with placeholder tokens replaced.
    Substituted,
    /// Explicit token-free template, left untouched.
    Explicit,
}

/// Binding decision for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBinding {
    pub name: String,
    /// `None` leaves the parameter to the host's default binding.
    pub source: Option<BindingSource>,
}

/// One finalized endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub verb: HttpVerb,
    pub template: String,
    pub template_source: TemplateSource,
    /// In parameter declaration order.
    pub parameter_bindings: Vec<ParameterBinding>,
}

impl EndpointDescriptor {
    /// Binding decided for `name`, if any.
    pub fn binding(&self, name: &str) -> Option<BindingSource> {
        self.parameter_bindings
            .iter()
            .find(|b| b.name == name)
            .and_then(|b| b.source)
    }
}

/// All endpoints derived from one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAction {
    pub declaring_type: String,
    pub method_name: String,
    pub endpoints: Vec<EndpointDescriptor>,
}

impl ResolvedAction {
    /// The first endpoint.
    ///
    /// # Panics
    ///
    /// Panics if `endpoints` is empty. Actions built by the resolver always
    /// carry at least one endpoint; a deserialized or hand-built action may not.
    pub fn primary(&self) -> &EndpointDescriptor {
        &self.endpoints[0]
    }
}
