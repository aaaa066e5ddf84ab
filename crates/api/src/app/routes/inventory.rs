use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, RawQuery, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockcheck_core::SkuCode;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/api/inventory", get(check_stock).post(check_stock_batch))
}

/// `GET /api/inventory?skuCode=A1&skuCode=B2`
pub async fn check_stock(
    Extension(services): Extension<Arc<AppServices>>,
    RawQuery(query): RawQuery,
) -> axum::response::Response {
    let sku_codes = dto::sku_codes_from_query(query.as_deref());
    availability_response(&services, &sku_codes).await
}

/// `POST /api/inventory` with a JSON array of SKU codes.
pub async fn check_stock_batch(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Vec<SkuCode>>, JsonRejection>,
) -> axum::response::Response {
    let Json(sku_codes) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };
    availability_response(&services, &sku_codes).await
}

async fn availability_response(services: &AppServices, sku_codes: &[SkuCode]) -> axum::response::Response {
    match services.availability().is_in_stock(sku_codes).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
