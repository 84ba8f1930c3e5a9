use lambda_runtime::Context;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::HandlerError;

pub const DEFAULT_YEAR: &str = "2012";
pub const DEFAULT_TITLE: &str = "The Amazing Spider-Man 2";

pub const SUCCESS_MESSAGE: &str = "Successfully inserted data!";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// ===== Request Models =====

/// The part of an API Gateway proxy event this handler reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiGatewayRequest {
    /// Returns the body only when it carries something to parse.
    pub fn payload(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
}

impl From<&Context> for InvocationContext {
    fn from(context: &Context) -> Self {
        InvocationContext {
            request_id: context.request_id.clone(),
            function_name: context.env_config.function_name.clone(),
        }
    }
}

// ===== Domain Models =====

/// One item of the movies table, keyed by `id`.
///
/// `year` holds the decimal text of a number, which is how DynamoDB
/// carries the `N` type on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    pub year: String,
    pub title: String,
    pub id: String,
}

impl MovieRecord {
    /// Record written when the request carries no payload.
    pub fn with_defaults(id: impl Into<String>) -> Self {
        MovieRecord {
            year: DEFAULT_YEAR.to_string(),
            title: DEFAULT_TITLE.to_string(),
            id: id.into(),
        }
    }

    pub fn from_body(body: &str) -> Result<Self, HandlerError> {
        let item = parse_body(body)?;
        Self::from_value(&item)
    }

    pub fn from_value(item: &Value) -> Result<Self, HandlerError> {
        let year = numeric_text("year", required(item, "year")?)?;
        let title = plain_text(required(item, "title")?);
        let id = plain_text(required(item, "id")?);

        Ok(MovieRecord { year, title, id })
    }
}

pub fn parse_body(body: &str) -> Result<Value, HandlerError> {
    Ok(serde_json::from_str(body)?)
}

/// `id` of a parsed payload as it will be stored, if the key is present.
pub fn payload_id(item: &Value) -> Option<String> {
    item.get("id").map(plain_text)
}

fn required<'a>(item: &'a Value, field: &'static str) -> Result<&'a Value, HandlerError> {
    item.get(field).ok_or(HandlerError::MissingField(field))
}

// Numbers keep their source text (serde_json `arbitrary_precision`), so
// large integer ids stay distinct.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn numeric_text(field: &'static str, value: &Value) -> Result<String, HandlerError> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => normalize_number(s.trim()).ok_or_else(|| HandlerError::InvalidField {
            field,
            reason: format!("{:?} is not a number", s),
        }),
        other => Err(HandlerError::InvalidField {
            field,
            reason: format!("expected a number, got {}", other),
        }),
    }
}

/// Canonical decimal text of a numeric string: `"+007"` becomes `"7"`,
/// `"5."` becomes `"5"`. Integers of any length are kept exact.
fn normalize_number(text: &str) -> Option<String> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let significant = digits.trim_start_matches('0');
        return Some(match (negative, significant.is_empty()) {
            (_, true) => "0".to_string(),
            (true, false) => format!("-{}", significant),
            (false, false) => significant.to_string(),
        });
    }

    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n.to_string()),
        _ => None,
    }
}

// ===== Response Models =====

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn json(status_code: u16, message: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        ApiGatewayResponse {
            status_code,
            headers,
            body: json!({ "message": message }).to_string(),
        }
    }

    pub fn inserted() -> Self {
        Self::json(200, SUCCESS_MESSAGE)
    }

    pub fn internal_error() -> Self {
        Self::json(500, INTERNAL_ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_body_coerces_fields_to_text() {
        let record = MovieRecord::from_body(r#"{"id": 42, "title": "Heat", "year": 1995}"#).unwrap();
        assert_eq!(
            record,
            MovieRecord {
                year: "1995".to_string(),
                title: "Heat".to_string(),
                id: "42".to_string(),
            }
        );
    }

    #[test]
    fn test_from_body_accepts_numeric_string_year() {
        let record = MovieRecord::from_body(r#"{"id": "a1", "title": "Alien", "year": " 1979 "}"#).unwrap();
        assert_eq!(record.year, "1979");
    }

    #[test]
    fn test_numeric_string_year_is_normalized() {
        assert_eq!(normalize_number("+1979").as_deref(), Some("1979"));
        assert_eq!(normalize_number("0042").as_deref(), Some("42"));
        assert_eq!(normalize_number("-0").as_deref(), Some("0"));
        assert_eq!(normalize_number("5.").as_deref(), Some("5"));
        assert_eq!(normalize_number("2.50").as_deref(), Some("2.5"));
        assert_eq!(
            normalize_number("123456789012345678901234567890").as_deref(),
            Some("123456789012345678901234567890")
        );
        assert_eq!(normalize_number("-"), None);
        assert_eq!(normalize_number("inf"), None);
    }

    #[test]
    fn test_large_integer_id_keeps_every_digit() {
        let a = MovieRecord::from_body(r#"{"id": 12345678901234567890123, "title": "A", "year": 2001}"#).unwrap();
        let b = MovieRecord::from_body(r#"{"id": 12345678901234567890124, "title": "B", "year": 2001}"#).unwrap();

        assert_eq!(a.id, "12345678901234567890123");
        assert_eq!(b.id, "12345678901234567890124");
    }

    #[test]
    fn test_large_integer_year_keeps_source_text() {
        let record = MovieRecord::from_body(r#"{"id": "x", "title": "Far Future", "year": 100000000000000000000001}"#).unwrap();
        assert_eq!(record.year, "100000000000000000000001");
    }

    #[test]
    fn test_from_body_rejects_non_numeric_year() {
        let err = MovieRecord::from_body(r#"{"id": "a1", "title": "Alien", "year": "soon"}"#).unwrap_err();
        assert_eq!(err.kind(), "InvalidFieldError");

        let err = MovieRecord::from_body(r#"{"id": "a1", "title": "Alien", "year": "NaN"}"#).unwrap_err();
        assert_eq!(err.kind(), "InvalidFieldError");
    }

    #[test]
    fn test_from_body_reports_missing_field() {
        let err = MovieRecord::from_body(r#"{"title": "X", "year": 2000}"#).unwrap_err();
        assert!(matches!(err, HandlerError::MissingField("id")));

        let err = MovieRecord::from_body(r#"{"id": "1", "year": 2000}"#).unwrap_err();
        assert!(matches!(err, HandlerError::MissingField("title")));
    }

    #[test]
    fn test_from_body_null_values_are_coerced() {
        let record = MovieRecord::from_body(r#"{"id": null, "title": null, "year": 2000}"#).unwrap();
        assert_eq!(record.title, "null");
        assert_eq!(record.id, "null");

        let err = MovieRecord::from_body(r#"{"id": "1", "title": "X", "year": null}"#).unwrap_err();
        assert_eq!(err.kind(), "InvalidFieldError");
    }

    #[test]
    fn test_payload_id_before_extraction() {
        let item = parse_body(r#"{"id": 9, "title": "Nine"}"#).unwrap();
        assert_eq!(payload_id(&item).as_deref(), Some("9"));

        let item = parse_body(r#"{"title": "Nameless"}"#).unwrap();
        assert_eq!(payload_id(&item), None);
    }

    #[test]
    fn test_from_body_non_object_has_no_fields() {
        let err = MovieRecord::from_body("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, HandlerError::MissingField("year")));
    }

    #[test]
    fn test_from_body_malformed_json() {
        let err = MovieRecord::from_body("{not json").unwrap_err();
        assert_eq!(err.kind(), "MalformedBodyError");
    }

    #[test]
    fn test_payload_treats_empty_body_as_absent() {
        let request = ApiGatewayRequest {
            body: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(request.payload(), None);

        let request = ApiGatewayRequest {
            body: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(request.payload(), Some(" "));
    }

    #[test]
    fn test_request_deserializes_proxy_event() {
        let request: ApiGatewayRequest = serde_json::from_value(json!({
            "resource": "/",
            "httpMethod": "POST",
            "path": "/",
            "headers": {"Accept": "*/*"},
            "body": "{\"id\": \"1\"}",
            "isBase64Encoded": false
        }))
        .unwrap();

        assert_eq!(request.http_method.as_deref(), Some("POST"));
        assert_eq!(request.path.as_deref(), Some("/"));
        assert_eq!(request.body.as_deref(), Some("{\"id\": \"1\"}"));
    }

    #[test]
    fn test_response_serializes_in_proxy_format() {
        let value = serde_json::to_value(ApiGatewayResponse::inserted()).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "headers": {"Content-Type": "application/json"},
                "body": "{\"message\":\"Successfully inserted data!\"}"
            })
        );
    }
}
