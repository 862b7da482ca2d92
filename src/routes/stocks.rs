use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::stocks::{StockList, UpdateStockRequest},
    error::AppResult,
    models::Stock,
    response::{ApiResponse, Flash, FlashData},
    routes::{STOCK_LIST, delete_flash},
    services::stock_service,
    state::AppState,
};

// Stock screens are reachable without a staff token.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stocks/", get(list_stocks))
        .route("/stocks/{id}/", get(get_stock))
        .route("/stocks/{id}/update/", get(stock_form).post(update_stock))
        .route("/stocks/{id}/delete/", post(delete_stock))
}

#[utoipa::path(
    get,
    path = "/stocks/",
    responses(
        (status = 200, description = "List stock records, newest first", body = ApiResponse<StockList>)
    ),
    tag = "Stocks"
)]
pub async fn list_stocks(State(state): State<AppState>) -> AppResult<Json<ApiResponse<StockList>>> {
    let resp = stock_service::list_stocks(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/stocks/{id}/",
    params(
        ("id" = i32, Path, description = "Stock ID")
    ),
    responses(
        (status = 200, description = "Get stock record", body = ApiResponse<Stock>),
        (status = 404, description = "Stock not found"),
    ),
    tag = "Stocks"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Stock>>> {
    let resp = stock_service::get_stock(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/stocks/{id}/update/",
    params(
        ("id" = i32, Path, description = "Stock ID")
    ),
    responses(
        (status = 200, description = "Current values for the stock form", body = ApiResponse<Stock>),
        (status = 404, description = "Stock not found"),
    ),
    tag = "Stocks"
)]
pub async fn stock_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Stock>>> {
    let resp = stock_service::get_stock(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/stocks/{id}/update/",
    params(
        ("id" = i32, Path, description = "Stock ID")
    ),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Updated stock record", body = ApiResponse<Stock>),
        (status = 404, description = "Stock not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Stocks"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStockRequest>,
) -> AppResult<Json<ApiResponse<Stock>>> {
    let resp = stock_service::update_stock(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/stocks/{id}/delete/",
    params(
        ("id" = i32, Path, description = "Stock ID")
    ),
    responses(
        (status = 303, description = "Redirect to the stock list with a status message", body = ApiResponse<FlashData>)
    ),
    tag = "Stocks"
)]
pub async fn delete_stock(State(state): State<AppState>, Path(id): Path<i32>) -> Flash {
    let result = stock_service::delete_stock(&state, id).await;
    delete_flash(result, STOCK_LIST)
}
