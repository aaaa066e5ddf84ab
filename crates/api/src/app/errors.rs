use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockcheck_infra::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "inventory lookup failed");

    match err {
        StoreError::Unavailable(msg) => json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg),
        StoreError::Query(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
        StoreError::Decode(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
