//! OpenAPI document builder for resolved endpoints.

use autoroute_core::{
    ApiRegistry, BindingSource, ConventionConfig, EndpointDescriptor, MethodCandidate,
    ParameterInfo, ResolvedAction, TypeDescriptor, template_placeholders,
};
use heck::{ToSnakeCase, ToTitleCase};
use serde_json::{Map, Value, json};

use crate::Result;
use crate::error::OpenApiError;
use crate::schema::{openapi_path, referenced_objects, type_schema};
use crate::types::{OpenApiOperation, OpenApiParameter, OpenApiRequestBody};

/// Builder for an OpenAPI document describing resolved endpoints.
///
/// Each endpoint of each action becomes one operation. Parameters are
/// placed by their binding decision:
///
/// - placeholders in the template become `path` parameters
/// - `Header` bindings become `header` parameters
/// - `Body` bindings become the JSON `requestBody`
/// - everything else is left to the host default, which is the query string
///
/// Two endpoints landing on the same path and method are an error.
#[derive(Debug, Clone)]
pub struct OpenApiBuilder {
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    paths: Map<String, Value>,
    schemas: Map<String, Value>,
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            title: None,
            version: None,
            description: None,
            paths: Map::new(),
            schemas: Map::new(),
        }
    }

    /// Set the API title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the API version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the API description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add every endpoint of one action.
    ///
    /// `candidate` supplies the parameter types the action no longer carries.
    pub fn add_action(mut self, candidate: &MethodCandidate, action: &ResolvedAction) -> Result<Self> {
        if candidate.declaring_type != action.declaring_type
            || candidate.method_name != action.method_name
        {
            return Err(OpenApiError::MismatchedAction {
                candidate: format!("{}::{}", candidate.declaring_type, candidate.method_name),
                action: format!("{}::{}", action.declaring_type, action.method_name),
            });
        }

        let base_id = format!("{}_{}", candidate.declaring_type, candidate.method_name).to_snake_case();
        for (index, endpoint) in action.endpoints.iter().enumerate() {
            let operation_id = if index == 0 {
                base_id.clone()
            } else {
                format!("{base_id}_{index}")
            };
            let operation = build_operation(candidate, endpoint, operation_id);
            self.insert_operation(&endpoint.template, endpoint.verb.as_str(), operation)?;
        }

        for param in &candidate.parameters {
            self.register_schemas(&param.ty);
        }
        Ok(self)
    }

    /// Add actions paired with the candidates they were resolved from.
    pub fn add_actions<'a, I>(self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a MethodCandidate, &'a ResolvedAction)>,
    {
        pairs
            .into_iter()
            .try_fold(self, |builder, (candidate, action)| builder.add_action(candidate, action))
    }

    /// Resolve a registry and add everything it produces.
    pub fn add_registry(self, registry: &ApiRegistry, config: &ConventionConfig) -> Result<Self> {
        let actions = registry.resolve(config);
        self.add_actions(registry.method_candidates().iter().zip(actions.iter()))
    }

    fn insert_operation(&mut self, template: &str, verb: &str, operation: OpenApiOperation) -> Result<()> {
        let path = openapi_path(template);
        let method = verb.to_lowercase();
        let operation = serde_json::to_value(&operation)?;

        let path_entry = self
            .paths
            .entry(path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(path_obj) = path_entry.as_object_mut() {
            if path_obj.contains_key(&method) {
                return Err(OpenApiError::DuplicateOperation {
                    method: verb.to_string(),
                    path,
                });
            }
            path_obj.insert(method, operation);
        }
        Ok(())
    }

    fn register_schemas(&mut self, ty: &TypeDescriptor) {
        let mut names = Vec::new();
        referenced_objects(ty, &mut names);
        for name in names {
            self.schemas
                .entry(name.to_string())
                .or_insert_with(|| json!({"type": "object", "title": name}));
        }
    }

    /// Build the final OpenAPI spec.
    pub fn build(self) -> Value {
        let mut spec = Map::new();

        spec.insert("openapi".to_string(), Value::String("3.0.0".to_string()));

        let mut info = Map::new();
        info.insert(
            "title".to_string(),
            Value::String(self.title.unwrap_or_else(|| "API".to_string())),
        );
        info.insert(
            "version".to_string(),
            Value::String(self.version.unwrap_or_else(|| "0.1.0".to_string())),
        );
        if let Some(desc) = self.description {
            info.insert("description".to_string(), Value::String(desc));
        }
        spec.insert("info".to_string(), Value::Object(info));

        spec.insert("paths".to_string(), Value::Object(self.paths));

        if !self.schemas.is_empty() {
            let mut components = Map::new();
            components.insert("schemas".to_string(), Value::Object(self.schemas));
            spec.insert("components".to_string(), Value::Object(components));
        }

        Value::Object(spec)
    }
}

fn build_operation(
    candidate: &MethodCandidate,
    endpoint: &EndpointDescriptor,
    operation_id: String,
) -> OpenApiOperation {
    let mut operation = OpenApiOperation::new(operation_id)
        .with_summary(candidate.method_name.to_title_case())
        .with_tag(candidate.declaring_type.clone())
        .with_response("200", json!({"description": "Success"}));

    let placeholders = template_placeholders(&endpoint.template);
    for name in &placeholders {
        let schema = find_param(candidate, name)
            .map(|p| type_schema(&p.ty))
            .unwrap_or_else(|| json!({"type": "string"}));
        operation = operation.with_parameter(OpenApiParameter::path(*name, schema));
    }

    let mut body = Vec::new();
    for param in &candidate.parameters {
        if placeholders.iter().any(|p| p.eq_ignore_ascii_case(&param.name)) {
            continue;
        }
        let required = !matches!(param.ty, TypeDescriptor::Nullable(_));
        let schema = type_schema(&param.ty);
        match endpoint.binding(&param.name) {
            Some(BindingSource::Body) => body.push((param, schema)),
            Some(BindingSource::Header) => {
                operation = operation
                    .with_parameter(OpenApiParameter::header(&param.name, required, schema));
            }
            // Path-bound but not in the template: nothing to describe.
            Some(BindingSource::Path) => {}
            Some(BindingSource::Query) | None => {
                operation = operation
                    .with_parameter(OpenApiParameter::query(&param.name, required, schema));
            }
        }
    }

    match body.as_slice() {
        [] => {}
        [(_, schema)] => {
            operation = operation.with_request_body(OpenApiRequestBody::json(schema.clone()));
        }
        many => {
            let properties: Map<String, Value> = many
                .iter()
                .map(|(param, schema)| (param.name.clone(), schema.clone()))
                .collect();
            let required: Vec<&str> = many
                .iter()
                .filter(|(param, _)| !matches!(param.ty, TypeDescriptor::Nullable(_)))
                .map(|(param, _)| param.name.as_str())
                .collect();
            operation = operation.with_request_body(OpenApiRequestBody::json(json!({
                "type": "object",
                "properties": properties,
                "required": required,
            })));
        }
    }

    operation
}

fn find_param<'a>(candidate: &'a MethodCandidate, name: &str) -> Option<&'a ParameterInfo> {
    candidate
        .parameters
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
