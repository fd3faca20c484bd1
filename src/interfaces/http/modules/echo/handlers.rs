use axum::{Extension, Json};
use chrono::Utc;

use crate::domain::test_request::generate_request_id;
use crate::domain::{TestRequest, TestResponse};
use crate::interfaces::http::common::{ErrorResponse, ValidatedJson};
use crate::interfaces::http::modules::request_id::RequestId;

/// Validate the body and echo its `data` back with a fresh id.
#[utoipa::path(
    post,
    path = "/api/test",
    tag = "Testing",
    request_body = TestRequest,
    responses(
        (status = 200, description = "Request accepted", body = TestResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse)
    )
)]
pub async fn process_test_request(
    Extension(RequestId(request_id)): Extension<RequestId>,
    ValidatedJson(request): ValidatedJson<TestRequest>,
) -> Json<TestResponse> {
    let id = generate_request_id(&mut rand::thread_rng());
    tracing::info!(
        %id,
        %request_id,
        source = %request.source,
        "Test request processed"
    );

    Json(TestResponse::accepted(request, id, Utc::now()))
}
