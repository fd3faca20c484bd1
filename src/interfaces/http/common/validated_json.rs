//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` buffers the body, parses it as JSON and hands the raw
//! value to [`FromPayload::from_payload`]. Unlike `axum::Json<T>` it does not
//! stop at the first serde error: the payload type decides what is wrong and
//! reports every issue. Any failure becomes a 400 with the issue list, except
//! a body that cannot be read at all (e.g. over the size limit), which keeps
//! the status of the underlying rejection.
//!
//! The `Content-Type` header is not checked; an empty body reads as `{}`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use super::ApiError;
use crate::domain::test_request::{validate_test_request, Issue};
use crate::domain::{TestRequest, ValidationError};

/// A payload type that validates itself from raw JSON.
pub trait FromPayload: Sized {
    fn from_payload(raw: &Value) -> Result<Self, ValidationError>;
}

impl FromPayload for TestRequest {
    fn from_payload(raw: &Value) -> Result<Self, ValidationError> {
        validate_test_request(raw)
    }
}

/// An extractor that parses JSON and validates it.
///
/// ```ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<TestRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: FromPayload,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;

        let raw = parse_body(&bytes)?;
        Ok(ValidatedJson(T::from_payload(&raw)?))
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, ValidationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes)
        .map_err(|e| ValidationError::new(vec![Issue::malformed_json(e)]))
}

// ── Tests ──────────────────────────────────────────────────────
