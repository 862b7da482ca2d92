use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    dto::skus::{CreateSkuRequest, SkuAddQuery, SkuFormContext, SkuList, UpdateSkuRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Sku,
    response::{ApiResponse, Flash, FlashData},
    routes::{SKU_LIST, delete_flash, params::SkuListQuery},
    services::{sku_service, sync_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/skus/", get(list_skus))
        .route("/skus/add/", get(sku_form).post(create_sku))
        .route("/skus/sync/", get(sync_skus))
        .route("/skus/{id}/", get(get_sku).post(update_sku))
        .route("/skus/{id}/delete/", post(delete_sku))
}

#[utoipa::path(
    get,
    path = "/skus/",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1; 10 items per page"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or code"),
        ("category" = Option<String>, Query, description = "Category of the SKU's SPU"),
        ("color" = Option<String>, Query, description = "Exact color"),
        ("material" = Option<String>, Query, description = "Exact material"),
        ("plating" = Option<String>, Query, description = "Exact plating process"),
    ),
    responses(
        (status = 200, description = "List SKUs, newest first, with filter facets", body = ApiResponse<SkuList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "SKUs"
)]
pub async fn list_skus(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SkuListQuery>,
) -> AppResult<Json<ApiResponse<SkuList>>> {
    let resp = sku_service::list_skus(&state, query).await?;
    Ok(Json(resp))
}

/// Flash for a SKU form opened without a usable `spu` parameter.
fn spu_flash(err: AppError) -> Flash {
    let message = match err {
        AppError::BadRequest(reason) => reason,
        AppError::NotFound => "SPU does not exist".to_string(),
        other => {
            tracing::warn!(error = %other, "resolving spu for sku form failed");
            other.to_string()
        }
    };
    Flash::error(message, SKU_LIST)
}

#[utoipa::path(
    get,
    path = "/skus/add/",
    params(
        ("spu" = String, Query, description = "SPU the new SKU belongs to"),
    ),
    responses(
        (status = 200, description = "SPU context for the SKU form", body = ApiResponse<SkuFormContext>),
        (status = 303, description = "Missing or unknown SPU; redirect to the SKU list", body = ApiResponse<FlashData>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "SKUs"
)]
pub async fn sku_form(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SkuAddQuery>,
) -> Response {
    let spu = match sku_service::resolve_spu(&state, query.spu.as_deref()).await {
        Ok(spu) => spu,
        Err(err) => return spu_flash(err).into_response(),
    };

    match sku_service::add_context(&state, spu).await {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/skus/add/",
    params(
        ("spu" = String, Query, description = "SPU the new SKU belongs to"),
    ),
    request_body = CreateSkuRequest,
    responses(
        (status = 201, description = "Create SKU", body = ApiResponse<Sku>),
        (status = 303, description = "Missing or unknown SPU; redirect to the SKU list", body = ApiResponse<FlashData>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Code or field validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "SKUs"
)]
pub async fn create_sku(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SkuAddQuery>,
    payload: Result<Json<CreateSkuRequest>, JsonRejection>,
) -> Response {
    // The SPU decides the outcome before the body is looked at.
    let spu = match sku_service::resolve_spu(&state, query.spu.as_deref()).await {
        Ok(spu) => spu,
        Err(err) => return spu_flash(err).into_response(),
    };
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };

    match sku_service::create_sku(&state, &user, spu, payload).await {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/skus/{id}/",
    params(
        ("id" = i32, Path, description = "SKU ID")
    ),
    responses(
        (status = 200, description = "Get SKU", body = ApiResponse<Sku>),
        (status = 404, description = "SKU not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "SKUs"
)]
pub async fn get_sku(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Sku>>> {
    let resp = sku_service::get_sku(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/skus/{id}/",
    params(
        ("id" = i32, Path, description = "SKU ID")
    ),
    request_body = UpdateSkuRequest,
    responses(
        (status = 200, description = "Updated SKU; the code never changes", body = ApiResponse<Sku>),
        (status = 404, description = "SKU not found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "SKUs"
)]
pub async fn update_sku(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSkuRequest>,
) -> AppResult<Json<ApiResponse<Sku>>> {
    let resp = sku_service::update_sku(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/skus/{id}/delete/",
    params(
        ("id" = i32, Path, description = "SKU ID")
    ),
    responses(
        (status = 303, description = "Redirect to the SKU list with a status message", body = ApiResponse<FlashData>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "SKUs"
)]
pub async fn delete_sku(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Flash {
    let result = sku_service::delete_sku(&state, &user, id).await;
    delete_flash(result, SKU_LIST)
}

#[utoipa::path(
    get,
    path = "/skus/sync/",
    responses(
        (status = 303, description = "Redirect to the SKU list with the sync outcome", body = ApiResponse<FlashData>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "SKUs"
)]
pub async fn sync_skus(State(state): State<AppState>, user: AuthUser) -> Flash {
    match sync_service::run_sync(&state, &user).await {
        Ok(count) => Flash::success(format!("Synced {count} records"), SKU_LIST),
        Err(err) => {
            tracing::warn!(error = %err, "product sync failed");
            let reason = match err {
                AppError::External(inner) => inner.to_string(),
                other => other.to_string(),
            };
            Flash::error(format!("Sync failed: {reason}"), SKU_LIST)
        }
    }
}
