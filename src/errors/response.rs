use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::openapi::schema::AdditionalProperties;
use utoipa::openapi::{ArrayBuilder, ObjectBuilder, RefOr, Schema, SchemaType};
use utoipa::ToSchema;

use super::codes::StatusDefaults;
use super::input::StructuredError;

/// Body keys the handler always writes itself
pub const RESERVED_BODY_KEYS: [&str; 4] = ["code", "status", "message", "details"];

/// Canonical JSON error body
///
/// Always carries `code`, `status` and `message`. A 400 additionally carries a
/// single-entry `details` array. Caller-supplied extra members follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorResponse(Map<String, Value>);

impl ErrorResponse {
    /// Build the body for an owned error
    pub fn from_structured(error: &StructuredError) -> Self {
        let defaults = StatusDefaults::lookup(error.status);
        let mut body = Map::new();

        body.insert("code".to_string(), Value::from(error.status));
        body.insert(
            "status".to_string(),
            error
                .status_message
                .clone()
                .unwrap_or_else(|| Value::from(defaults.label)),
        );
        body.insert(
            "message".to_string(),
            error
                .message
                .clone()
                .unwrap_or_else(|| Value::from(defaults.message)),
        );

        if defaults.has_field_details() {
            body.insert(
                "details".to_string(),
                Value::Array(vec![field_detail(error)]),
            );
        }

        for (key, value) in &error.other {
            if RESERVED_BODY_KEYS.contains(&key.as_str()) {
                continue;
            }
            body.insert(key.clone(), value.clone());
        }

        Self(body)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn field_detail(error: &StructuredError) -> Value {
    let mut detail = Map::new();
    if let Some(field) = &error.field {
        detail.insert("field".to_string(), field.clone());
    }
    detail.insert(
        "message".to_string(),
        error
            .field_message
            .clone()
            .unwrap_or_else(|| Value::from(format!("{} is invalid", error.field_text()))),
    );
    Value::Object(detail)
}

impl<'s> ToSchema<'s> for ErrorResponse {
    fn schema() -> (&'s str, RefOr<Schema>) {
        let detail = ObjectBuilder::new()
            .schema_type(SchemaType::Object)
            .property(
                "field",
                ObjectBuilder::new()
                    .schema_type(SchemaType::String)
                    .description(Some("Bad request field")),
            )
            .property(
                "message",
                ObjectBuilder::new()
                    .schema_type(SchemaType::String)
                    .description(Some("Message relative to this field")),
            )
            .required("message");

        let schema = ObjectBuilder::new()
            .schema_type(SchemaType::Object)
            .description(Some("Canonical error response"))
            .property(
                "code",
                ObjectBuilder::new()
                    .schema_type(SchemaType::Integer)
                    .description(Some("The same as the HTTP status code")),
            )
            .required("code")
            .property(
                "status",
                ObjectBuilder::new()
                    .schema_type(SchemaType::String)
                    .description(Some("The same as the HTTP status message")),
            )
            .required("status")
            .property(
                "message",
                ObjectBuilder::new()
                    .schema_type(SchemaType::String)
                    .description(Some("Human readable error message")),
            )
            .required("message")
            .property(
                "details",
                ArrayBuilder::new()
                    .items(detail)
                    .description(Some("Present for 400 only")),
            )
            .additional_properties(Some(AdditionalProperties::FreeForm(true)));

        ("ErrorResponse", schema.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_for(value: Value) -> Value {
        let error = StructuredError::from_value(&value).unwrap();
        ErrorResponse::from_structured(&error).into_value()
    }

    #[test]
    fn test_bad_request_defaults() {
        assert_eq!(
            body_for(json!({"status": 400, "field": "email"})),
            json!({
                "code": 400,
                "status": "Bad Request",
                "message": "Invalid request parameter.",
                "details": [{"field": "email", "message": "email is invalid"}]
            })
        );
    }

    #[test]
    fn test_bad_request_overrides() {
        assert_eq!(
            body_for(json!({
                "status": 400,
                "field": "email",
                "fieldMessage": "format invalid",
                "message": "bad input",
                "statusMessage": "Bad Input"
            })),
            json!({
                "code": 400,
                "status": "Bad Input",
                "message": "bad input",
                "details": [{"field": "email", "message": "format invalid"}]
            })
        );
    }

    #[test]
    fn test_bad_request_without_field() {
        assert_eq!(
            body_for(json!({"status": 400})),
            json!({
                "code": 400,
                "status": "Bad Request",
                "message": "Invalid request parameter.",
                "details": [{"message": "undefined is invalid"}]
            })
        );
    }

    #[test]
    fn test_unauthorized_and_forbidden() {
        assert_eq!(
            body_for(json!({"status": 401})),
            json!({"code": 401, "status": "Unauthorized", "message": "Invalid credentials"})
        );
        assert_eq!(
            body_for(json!({"status": 403})),
            json!({"code": 403, "status": "Forbidden", "message": "Insufficient authority"})
        );
    }

    #[test]
    fn test_unknown_status_uses_empty_defaults() {
        assert_eq!(
            body_for(json!({"status": 999, "message": "weird"})),
            json!({"code": 999, "status": "", "message": "weird"})
        );
    }

    #[test]
    fn test_empty_string_override_is_honored() {
        assert_eq!(
            body_for(json!({"status": 500, "message": "", "statusMessage": null})),
            json!({"code": 500, "status": "Internal Server Error", "message": ""})
        );
    }

    #[test]
    fn test_extra_fields_merge_without_clobbering() {
        assert_eq!(
            body_for(json!({
                "status": 404,
                "extra": "foo",
                "code": 1,
                "details": ["nope"]
            })),
            json!({"code": 404, "status": "Not Found", "message": "Not Found", "extra": "foo"})
        );
    }

    #[test]
    fn test_legacy_status_body_has_empty_defaults() {
        assert_eq!(
            body_for(json!({"status": 520})),
            json!({"code": 520, "status": "", "message": ""})
        );
    }

    #[test]
    fn test_serialization_is_stable() {
        let value = json!({"status": 400, "field": "name", "trace": {"id": 7}});
        let first = serde_json::to_string(&body_for(value.clone())).unwrap();
        let second = serde_json::to_string(&body_for(value)).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(r#"{"code":400,"status":"Bad Request""#));
    }
}
