use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::spus::{CreateSpuRequest, SpuFormOptions, SpuList, UpdateSpuRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Spu,
    response::{ApiResponse, Flash, FlashData},
    routes::{SPU_LIST, delete_flash, params::ListQuery},
    services::spu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/spus/", get(list_spus))
        .route("/spus/add/", get(spu_form).post(create_spu))
        .route("/spus/{id}/", get(get_spu).post(update_spu))
        .route("/spus/{id}/delete/", post(delete_spu))
}

#[utoipa::path(
    get,
    path = "/spus/",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1; 10 items per page"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or code"),
    ),
    responses(
        (status = 200, description = "List SPUs, newest first", body = ApiResponse<SpuList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "SPUs"
)]
pub async fn list_spus(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<SpuList>>> {
    let resp = spu_service::list_spus(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/spus/add/",
    responses(
        (status = 200, description = "Choices for the SPU form", body = ApiResponse<SpuFormOptions>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "SPUs"
)]
pub async fn spu_form(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<SpuFormOptions>>> {
    let resp = spu_service::form_options(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/spus/add/",
    request_body = CreateSpuRequest,
    responses(
        (status = 201, description = "Create SPU", body = ApiResponse<Spu>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Code, category or field validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "SPUs"
)]
pub async fn create_spu(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSpuRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Spu>>)> {
    let resp = spu_service::create_spu(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/spus/{id}/",
    params(
        ("id" = i32, Path, description = "SPU ID")
    ),
    responses(
        (status = 200, description = "Get SPU", body = ApiResponse<Spu>),
        (status = 404, description = "SPU not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "SPUs"
)]
pub async fn get_spu(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Spu>>> {
    let resp = spu_service::get_spu(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/spus/{id}/",
    params(
        ("id" = i32, Path, description = "SPU ID")
    ),
    request_body = UpdateSpuRequest,
    responses(
        (status = 200, description = "Updated SPU; the code never changes", body = ApiResponse<Spu>),
        (status = 404, description = "SPU not found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "SPUs"
)]
pub async fn update_spu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSpuRequest>,
) -> AppResult<Json<ApiResponse<Spu>>> {
    let resp = spu_service::update_spu(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/spus/{id}/delete/",
    params(
        ("id" = i32, Path, description = "SPU ID")
    ),
    responses(
        (status = 303, description = "Redirect to the SPU list with a status message", body = ApiResponse<FlashData>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "SPUs"
)]
pub async fn delete_spu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Flash {
    let result = spu_service::delete_spu(&state, &user, id).await;
    delete_flash(result, SPU_LIST)
}
