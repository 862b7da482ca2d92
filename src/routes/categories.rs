use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::categories::{CategoryFormOptions, CategoryList, CreateCategoryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Category,
    response::{ApiResponse, Flash, FlashData},
    routes::{CATEGORY_LIST, delete_flash, params::ListQuery},
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories/", get(list_categories))
        .route("/categories/add/", get(category_form).post(create_category))
        .route("/categories/{id}/delete/", post(delete_category))
}

#[utoipa::path(
    get,
    path = "/categories/",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1; 10 items per page"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on either name"),
    ),
    responses(
        (status = 200, description = "List categories by rank", body = ApiResponse<CategoryList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/categories/add/",
    responses(
        (status = 200, description = "Choices for the category form", body = ApiResponse<CategoryFormOptions>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn category_form(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<CategoryFormOptions>>> {
    let resp = category_service::form_options(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/categories/add/",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Category>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Hierarchy or field validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let resp = category_service::create_category(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/categories/{id}/delete/",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 303, description = "Redirect to the category list with a status message", body = ApiResponse<FlashData>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Flash {
    let result = category_service::delete_category(&state, &user, id).await;
    delete_flash(result, CATEGORY_LIST)
}
