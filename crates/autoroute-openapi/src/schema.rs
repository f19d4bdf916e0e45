//! JSON schemas for parameter types, and OpenAPI path keys.

use autoroute_core::TypeDescriptor;
use serde_json::{Value, json};

/// JSON schema for a parameter type.
///
/// Named objects become `$ref`s into `components/schemas`.
pub fn type_schema(ty: &TypeDescriptor) -> Value {
    match ty {
        TypeDescriptor::Bool => json!({"type": "boolean"}),
        TypeDescriptor::Char => json!({"type": "string", "minLength": 1, "maxLength": 1}),
        TypeDescriptor::Integer => json!({"type": "integer"}),
        TypeDescriptor::Float => json!({"type": "number"}),
        TypeDescriptor::Decimal => json!({"type": "number", "format": "decimal"}),
        TypeDescriptor::String => json!({"type": "string"}),
        TypeDescriptor::DateTime => json!({"type": "string", "format": "date-time"}),
        TypeDescriptor::Uuid => json!({"type": "string", "format": "uuid"}),
        TypeDescriptor::Enum(name) => json!({"type": "string", "title": name}),
        TypeDescriptor::Nullable(inner) => {
            let mut schema = type_schema(inner);
            if let Some(obj) = schema.as_object_mut()
                && !obj.contains_key("$ref")
            {
                obj.insert("nullable".to_string(), Value::Bool(true));
                return schema;
            }
            // 3.0 ignores siblings of $ref
            json!({"allOf": [schema], "nullable": true})
        }
        TypeDescriptor::Array(elem) => json!({"type": "array", "items": type_schema(elem)}),
        TypeDescriptor::Tuple(items) => json!({
            "type": "array",
            "minItems": items.len(),
            "maxItems": items.len(),
        }),
        TypeDescriptor::Object(name) => json!({"$ref": format!("#/components/schemas/{name}")}),
    }
}

/// Named object types referenced by a type, in first-seen order.
pub(crate) fn referenced_objects<'a>(ty: &'a TypeDescriptor, out: &mut Vec<&'a str>) {
    match ty {
        TypeDescriptor::Object(name) => {
            if !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        TypeDescriptor::Nullable(inner) | TypeDescriptor::Array(inner) => {
            referenced_objects(inner, out)
        }
        TypeDescriptor::Tuple(items) => {
            for item in items {
                referenced_objects(item, out);
            }
        }
        _ => {}
    }
}

/// OpenAPI path key for a route template.
///
/// Adds the leading `/` and reduces placeholders to bare names:
/// `api/users/{id:guid}/{*rest}` becomes `/api/users/{id}/{rest}`.
pub fn openapi_path(template: &str) -> String {
    let mut path = String::with_capacity(template.len() + 1);
    if !template.starts_with('/') {
        path.push('/');
    }

    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        path.push_str(&rest[..start]);
        let inner = rest[start + 1..start + len].trim_start_matches('*');
        let name = inner
            .split([':', '='])
            .next()
            .unwrap_or_default()
            .trim_end_matches('?');
        path.push('{');
        path.push_str(name);
        path.push('}');
        rest = &rest[start + len + 1..];
    }
    path.push_str(rest);
    path
}
