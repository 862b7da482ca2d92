use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{
    error::{AppError, AppResult},
    response::{ApiResponse, Flash, Meta},
    state::AppState,
};

pub mod categories;
pub mod doc;
pub mod health;
pub mod params;
pub mod skus;
pub mod spus;
pub mod stocks;

pub const CATEGORY_LIST: &str = "/categories/";
pub const SPU_LIST: &str = "/spus/";
pub const SKU_LIST: &str = "/skus/";
pub const STOCK_LIST: &str = "/stocks/";

// Build the router without binding state; it will be provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(categories::router())
        .merge(spus::router())
        .merge(skus::router())
        .merge(stocks::router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
}

/// Turns the outcome of a delete into a flash back to the listing; failures
/// never propagate past this point.
pub(crate) fn delete_flash(
    result: AppResult<ApiResponse<serde_json::Value>>,
    redirect_to: &'static str,
) -> Flash {
    match result {
        Ok(resp) => Flash::success(resp.message, redirect_to),
        Err(err) => {
            tracing::warn!(error = %err, redirect_to, "delete failed");
            let reason = match err {
                AppError::NotFound => "record not found".to_string(),
                other => other.to_string(),
            };
            Flash::error(format!("Delete failed: {reason}"), redirect_to)
        }
    }
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
