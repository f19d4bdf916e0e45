//! Selector resolution: verb → template → bindings for each candidate.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::classify::{TypeKind, classify};
use crate::config::ConventionConfig;
use crate::error::{ConventionError, Result};
use crate::model::{
    BindingSource, EndpointDescriptor, ExistingSelector, MethodCandidate, ParameterBinding,
    ParameterInfo, ResolvedAction, TemplateSource,
};
use crate::path::{RoutePlan, template_placeholders};
use crate::verb::{HttpVerb, resolve_verb};

/// Applies the naming convention to method candidates.
///
/// Holds only a shared reference to the frozen config, so one resolver can be
/// used for the whole startup pass.
#[derive(Debug, Clone, Copy)]
pub struct ConventionResolver<'c> {
    config: &'c ConventionConfig,
}

impl<'c> ConventionResolver<'c> {
    pub fn new(config: &'c ConventionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'c ConventionConfig {
        self.config
    }

    /// Resolve every candidate, in order.
    pub fn resolve_all<'a, I>(&self, candidates: I) -> Vec<ResolvedAction>
    where
        I: IntoIterator<Item = &'a MethodCandidate>,
    {
        let actions: Vec<_> = candidates.into_iter().map(|c| self.resolve(c)).collect();
        info!(
            actions = actions.len(),
            endpoints = actions.iter().map(|a| a.endpoints.len()).sum::<usize>(),
            "resolved dynamic API endpoints"
        );
        actions
    }

    /// Resolve one candidate into its finalized endpoints.
    pub fn resolve(&self, candidate: &MethodCandidate) -> ResolvedAction {
        let verb = resolve_verb(
            self.config.verb_prefixes(),
            &candidate.method_name,
            &candidate.explicit_verbs(),
        );

        let selectors: Vec<&ExistingSelector> =
            candidate.selectors.iter().filter(|s| !s.is_empty()).collect();

        let routes: Vec<(HttpVerb, String, TemplateSource)> = if selectors.is_empty() {
            let plan = RoutePlan::new(self.config, candidate, verb);
            vec![(verb, plan.template(self.config), TemplateSource::Synthesized)]
        } else {
            selectors
                .into_iter()
                .map(|selector| self.resolve_selector(candidate, selector, verb))
                .collect()
        };

        let bindings = self.bind_parameters(candidate, verb, &routes);

        let endpoints: Vec<EndpointDescriptor> = routes
            .into_iter()
            .map(|(verb, template, template_source)| EndpointDescriptor {
                verb,
                template,
                template_source,
                parameter_bindings: bindings.clone(),
            })
            .collect();

        for endpoint in &endpoints {
            debug!(
                declaring_type = %candidate.declaring_type,
                method = %candidate.method_name,
                verb = %endpoint.verb,
                template = %endpoint.template,
                source = ?endpoint.template_source,
                "resolved endpoint"
            );
        }

        ResolvedAction {
            declaring_type: candidate.declaring_type.clone(),
            method_name: candidate.method_name.clone(),
            endpoints,
        }
    }

    fn resolve_selector(
        &self,
        candidate: &MethodCandidate,
        selector: &ExistingSelector,
        candidate_verb: HttpVerb,
    ) -> (HttpVerb, String, TemplateSource) {
        let verb = selector.verb.unwrap_or(candidate_verb);
        let plan = RoutePlan::new(self.config, candidate, verb);

        match selector.template.as_deref().map(str::trim) {
            Some(template) if !template.is_empty() => match plan.substitute(template) {
                Some(substituted) => (verb, substituted, TemplateSource::Substituted),
                None => (verb, template.to_string(), TemplateSource::Explicit),
            },
            _ => (verb, plan.template(self.config), TemplateSource::Synthesized),
        }
    }

    /// Decide binding sources once per candidate, using the candidate-level verb.
    fn bind_parameters(
        &self,
        candidate: &MethodCandidate,
        verb: HttpVerb,
        routes: &[(HttpVerb, String, TemplateSource)],
    ) -> Vec<ParameterBinding> {
        let plan = RoutePlan::new(self.config, candidate, verb);
        let placeholders: Vec<&str> = routes
            .iter()
            .flat_map(|(_, template, _)| template_placeholders(template))
            .collect();

        let is_path_matched = |param: &ParameterInfo| {
            plan.path_parameter_names().any(|n| n == param.name)
                || placeholders.iter().any(|p| p.eq_ignore_ascii_case(&param.name))
        };

        for ignored in &plan.ignored {
            if !is_path_matched(ignored) {
                warn!(
                    declaring_type = %candidate.declaring_type,
                    method = %candidate.method_name,
                    parameter = %ignored.name,
                    "only two id parameters are placed in a route; this one stays query/body bound"
                );
            }
        }

        candidate
            .parameters
            .iter()
            .map(|param| ParameterBinding {
                name: param.name.clone(),
                source: decide_binding(param, verb, is_path_matched(param)),
            })
            .collect()
    }
}

/// Binding rule for a single parameter.
///
/// Explicit bindings are never overridden. GET and HEAD are left to the host.
/// Otherwise simple path-matched values bind from the path, other simple
/// values fall through to the query string, and complex values bind from
/// the body.
pub fn decide_binding(
    param: &ParameterInfo,
    verb: HttpVerb,
    path_matched: bool,
) -> Option<BindingSource> {
    if param.binding.is_some() {
        return param.binding;
    }
    if verb.uses_host_binding() {
        return None;
    }
    match classify(&param.ty) {
        TypeKind::Simple if path_matched => Some(BindingSource::Path),
        TypeKind::Simple => None,
        TypeKind::Complex => Some(BindingSource::Body),
    }
}

/// Reject route tables where two endpoints share a verb and route shape.
///
/// Placeholder names don't matter: `users/{id}` and `users/{user_id}` collide.
pub fn ensure_unique_routes(actions: &[ResolvedAction]) -> Result<()> {
    let mut seen: HashMap<String, (String, String)> = HashMap::new();

    for action in actions {
        let method = format!("{}::{}", action.declaring_type, action.method_name);
        for endpoint in &action.endpoints {
            let signature = format!(
                "{} {}",
                endpoint.verb,
                normalize_route_shape(&endpoint.template)
            );
            if let Some((existing_method, existing_template)) = seen.get(&signature) {
                return Err(ConventionError::DuplicateRoute {
                    verb: endpoint.verb.to_string(),
                    template: endpoint.template.clone(),
                    method,
                    existing_template: existing_template.clone(),
                    existing_method: existing_method.clone(),
                });
            }
            seen.insert(signature, (method.clone(), endpoint.template.clone()));
        }
    }

    Ok(())
}

fn normalize_route_shape(template: &str) -> String {
    template
        .trim_matches('/')
        .split('/')
        .map(|segment| {
            if segment.starts_with('{') && segment.ends_with('}') {
                "{*}".to_string()
            } else {
                segment.to_ascii_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
