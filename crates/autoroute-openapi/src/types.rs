//! Typed OpenAPI structures.
//!
//! The subset of OpenAPI 3.0 needed to describe conventional endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// An OpenAPI operation (one verb on one path).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiOperation {
    /// Unique operation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<OpenApiParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<OpenApiRequestBody>,
    /// Response definitions keyed by status code.
    #[serde(default)]
    pub responses: Map<String, Value>,
}

/// Where a parameter appears in the request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

/// An OpenAPI parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenApiParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub schema: Value,
}

/// A JSON request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenApiRequestBody {
    pub required: bool,
    pub content: Map<String, Value>,
}

impl OpenApiOperation {
    /// Create a new operation with an id.
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: Some(operation_id.into()),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, param: OpenApiParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_request_body(mut self, body: OpenApiRequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Add a response.
    pub fn with_response(mut self, status: impl Into<String>, response: Value) -> Self {
        self.responses.insert(status.into(), response);
        self
    }
}

impl OpenApiParameter {
    /// Create a path parameter.
    pub fn path(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Path,
            required: true, // Path params are always required
            schema,
        }
    }

    /// Create a query parameter.
    pub fn query(name: impl Into<String>, required: bool, schema: Value) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Query,
            required,
            schema,
        }
    }

    /// Create a header parameter.
    pub fn header(name: impl Into<String>, required: bool, schema: Value) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Header,
            required,
            schema,
        }
    }
}

impl OpenApiRequestBody {
    /// A required `application/json` body with the given schema.
    pub fn json(schema: Value) -> Self {
        let mut content = Map::new();
        content.insert("application/json".to_string(), json!({ "schema": schema }));
        Self {
            required: true,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_serializes_camel_case() {
        let op = OpenApiOperation::new("user_service_create")
            .with_request_body(OpenApiRequestBody::json(json!({"type": "object"})))
            .with_response("200", json!({"description": "Success"}));
        let value = serde_json::to_value(&op).unwrap();

        assert_eq!(value["operationId"], "user_service_create");
        assert_eq!(
            value["requestBody"]["content"]["application/json"]["schema"]["type"],
            "object"
        );
        assert!(value.get("parameters").is_none());
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn test_parameter_location() {
        let param = OpenApiParameter::header("x-tenant", false, json!({"type": "string"}));
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["in"], "header");
        assert_eq!(value["required"], false);
    }
}
