//! Echo request validation and response
//!
//! `POST /api/test` is the only endpoint that accepts user input. The body is
//! checked in two passes: presence and primitive type on the raw JSON value,
//! then the typed rules declared on [`TestRequest`]. Every violation is
//! collected; nothing is coerced.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError as FieldError, ValidationErrors};

use crate::support::time::iso_timestamp;

/// Prefix of generated request ids
pub const REQUEST_ID_PREFIX: &str = "req-";
const REQUEST_ID_LEN: usize = 7;
const REQUEST_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const FIELDS: [&str; 3] = ["data", "timestamp", "source"];

/// Body of `POST /api/test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TestRequest {
    #[validate(length(min = 1, message = "String must contain at least 1 character(s)"))]
    pub data: String,
    /// RFC 3339 date-time
    #[validate(
        length(min = 1, message = "String must contain at least 1 character(s)"),
        custom(function = "validate_datetime")
    )]
    pub timestamp: String,
    #[validate(length(min = 1, message = "String must contain at least 1 character(s)"))]
    pub source: String,
}

/// Successful response of `POST /api/test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestResponse {
    pub success: bool,
    pub processed_at: String,
    /// Opaque id, `req-` followed by 7 lowercase alphanumerics
    pub id: String,
    /// Echo of the request's `data`
    pub data: String,
}

impl TestResponse {
    pub fn accepted(request: TestRequest, id: String, processed_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            processed_at: iso_timestamp(processed_at),
            id,
            data: request.data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    InvalidDate,
    InvalidJson,
}

/// One field-level violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    pub code: IssueCode,
    /// Field path; empty when the body itself is the problem
    pub path: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

impl Issue {
    fn required(field: &str) -> Self {
        Self {
            code: IssueCode::InvalidType,
            path: vec![field.to_string()],
            message: "Required".to_string(),
            expected: Some("string".to_string()),
            received: Some("undefined".to_string()),
        }
    }

    /// The body could not be parsed as JSON at all.
    pub fn malformed_json(reason: impl std::fmt::Display) -> Self {
        Self {
            code: IssueCode::InvalidJson,
            path: Vec::new(),
            message: format!("Malformed JSON: {}", reason),
            expected: None,
            received: None,
        }
    }

    fn wrong_type(path: Vec<String>, expected: &str, value: &Value) -> Self {
        let received = json_type(value);
        Self {
            code: IssueCode::InvalidType,
            path,
            message: format!("Expected {}, received {}", expected, received),
            expected: Some(expected.to_string()),
            received: Some(received.to_string()),
        }
    }

    fn from_field_error(field: &str, err: &FieldError) -> Self {
        let code = match &*err.code {
            "invalid_date" => IssueCode::InvalidDate,
            _ => IssueCode::TooSmall,
        };
        let message = err
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string());

        Self {
            code,
            path: vec![field.to_string()],
            message,
            expected: None,
            received: None,
        }
    }
}

/// Rejected request body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid request data ({} issue(s))", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

/// Validate a raw JSON body into a [`TestRequest`].
pub fn validate_test_request(raw: &Value) -> Result<TestRequest, ValidationError> {
    let Some(object) = raw.as_object() else {
        return Err(ValidationError::new(vec![Issue::wrong_type(
            Vec::new(),
            "object",
            raw,
        )]));
    };

    let mut issues = Vec::new();
    let [data, timestamp, source] =
        FIELDS.map(|field| string_field(object, field, &mut issues));

    let typed_ok = [data.is_some(), timestamp.is_some(), source.is_some()];
    let request = TestRequest {
        data: data.unwrap_or_default(),
        timestamp: timestamp.unwrap_or_default(),
        source: source.unwrap_or_default(),
    };

    if let Err(errors) = request.validate() {
        // Rules only apply to fields that passed the type check.
        for (field, _) in FIELDS.iter().zip(typed_ok).filter(|(_, ok)| *ok) {
            issues.extend(field_issues(&errors, field));
        }
    }

    if issues.is_empty() {
        Ok(request)
    } else {
        issues.sort_by_key(|issue| field_order(&issue.path));
        Err(ValidationError::new(issues))
    }
}

/// Generate an opaque request id such as `req-k3v9x0a`.
pub fn generate_request_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..REQUEST_ID_LEN)
        .map(|_| REQUEST_ID_CHARSET[rng.gen_range(0..REQUEST_ID_CHARSET.len())] as char)
        .collect();
    format!("{}{}", REQUEST_ID_PREFIX, suffix)
}

fn string_field(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<Issue>,
) -> Option<String> {
    match object.get(field) {
        None => {
            issues.push(Issue::required(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(Issue::wrong_type(vec![field.to_string()], "string", other));
            None
        }
    }
}

fn field_issues(errors: &ValidationErrors, field: &str) -> Vec<Issue> {
    errors
        .field_errors()
        .iter()
        .filter(|(name, _)| name.to_string() == field)
        .flat_map(|(_, errs)| errs.iter().map(move |e| Issue::from_field_error(field, e)))
        .collect()
}

fn field_order(path: &[String]) -> usize {
    path.first()
        .and_then(|p| FIELDS.iter().position(|f| f == p))
        .unwrap_or(0)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Empty values are reported by the length rule.
fn validate_datetime(value: &str) -> Result<(), FieldError> {
    if value.is_empty() || DateTime::parse_from_rfc3339(value).is_ok() {
        return Ok(());
    }
    let mut err = FieldError::new("invalid_date");
    err.message = Some(Cow::from("Invalid datetime"));
    Err(err)
}
