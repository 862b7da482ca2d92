use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, Iterable,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use validator::Validate;

use crate::{
    audit,
    catalog::rules::check_new_code,
    dto::spus::{CreateSpuRequest, SpuFormOptions, SpuList, UpdateSpuRequest},
    entity::{
        Categories, Skus, Spus, Stocks,
        categories::{Column as CategoryCol, Model as CategoryModel},
        enums::Status,
        skus::Column as SkuCol,
        spus::{ActiveModel, Column, Model as SpuModel},
        stocks::Column as StockCol,
    },
    error::{AppError, AppResult, FieldError},
    middleware::auth::AuthUser,
    models::Spu,
    response::{ApiResponse, Meta},
    routes::params::{ListQuery, normalize_page, search_term},
    services::{category_service::category_option, contains_ci},
    state::AppState,
};

pub async fn list_spus(state: &AppState, query: ListQuery) -> AppResult<ApiResponse<SpuList>> {
    let (page, limit, offset) = normalize_page(query.page);
    let mut condition = Condition::all();

    if let Some(search) = search_term(&query.search) {
        condition = condition.add(
            Condition::any()
                .add(contains_ci((Spus, Column::Name), search))
                .add(contains_ci((Spus, Column::Code), search)),
        );
    }

    let finder = Spus::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .find_also_related(Categories)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(spu, category)| spu_from_entity(spu, category.as_ref()))
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("SPUs", SpuList { items }, Some(meta)))
}

pub async fn form_options(state: &AppState) -> AppResult<ApiResponse<SpuFormOptions>> {
    let categories = Categories::find()
        .filter(CategoryCol::IsLastLevel.eq(true))
        .order_by_asc(CategoryCol::Rank)
        .order_by_asc(CategoryCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_option)
        .collect();

    let data = SpuFormOptions {
        categories,
        statuses: Status::iter().collect(),
    };
    Ok(ApiResponse::success("SPU form", data, None))
}

pub async fn get_spu(state: &AppState, id: i32) -> AppResult<ApiResponse<Spu>> {
    let (spu, category) = Spus::find_by_id(id)
        .find_also_related(Categories)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "SPU",
        spu_from_entity(spu, category.as_ref()),
        None,
    ))
}

pub async fn create_spu(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSpuRequest,
) -> AppResult<ApiResponse<Spu>> {
    payload.validate()?;
    let mut errors = Vec::new();

    let code = match check_new_code(&payload.code) {
        Ok(code) => {
            let taken = Spus::find()
                .filter(Column::Code.eq(code.as_str()))
                .count(&state.orm)
                .await?;
            if taken > 0 {
                errors.push(FieldError::new("code", "SPU code already exists"));
            }
            code
        }
        Err(err) => {
            errors.push(err);
            String::new()
        }
    };

    let category = match leaf_category(state, payload.category_id).await? {
        Ok(category) => Some(category),
        Err(err) => {
            errors.push(err);
            None
        }
    };

    let category = match category {
        Some(category) if errors.is_empty() => category,
        _ => return Err(AppError::Validation(errors)),
    };

    let now = Utc::now();
    let active = ActiveModel {
        id: NotSet,
        code: Set(code),
        name: Set(payload.name.trim().to_string()),
        remark: Set(payload.remark.filter(|r| !r.trim().is_empty())),
        sales_channel: Set(payload.sales_channel.trim().to_string()),
        category_id: Set(category.id),
        status: Set(payload.status),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let spu = active.insert(&state.orm).await?;

    tracing::info!(spu_id = spu.id, code = %spu.code, "spu created");
    audit::record(
        state,
        Some(user),
        "spu_create",
        "spus",
        serde_json::json!({ "spu_id": spu.id, "code": spu.code }),
    )
    .await;

    Ok(ApiResponse::success(
        "SPU created",
        spu_from_entity(spu, Some(&category)),
        Some(Meta::empty()),
    ))
}

/// Applies an edit. The stored code is kept whatever the request carries.
pub async fn update_spu(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateSpuRequest,
) -> AppResult<ApiResponse<Spu>> {
    payload.validate()?;

    let existing = Spus::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    if payload.code.as_deref().is_some_and(|c| c.trim() != existing.code) {
        tracing::debug!(spu_id = id, "ignoring submitted SPU code change");
    }

    let category = match payload.category_id {
        Some(category_id) if category_id != existing.category_id => {
            Some(leaf_category(state, category_id).await??)
        }
        _ => None,
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(remark) = payload.remark {
        active.remark = Set(Some(remark).filter(|r| !r.trim().is_empty()));
    }
    if let Some(sales_channel) = payload.sales_channel {
        active.sales_channel = Set(sales_channel.trim().to_string());
    }
    if let Some(category) = &category {
        active.category_id = Set(category.id);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let spu = active.update(&state.orm).await?;
    let category = match category {
        Some(category) => Some(category),
        None => Categories::find_by_id(spu.category_id).one(&state.orm).await?,
    };

    tracing::info!(spu_id = spu.id, "spu updated");
    audit::record(
        state,
        Some(user),
        "spu_update",
        "spus",
        serde_json::json!({ "spu_id": spu.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "SPU updated",
        spu_from_entity(spu, category.as_ref()),
        Some(Meta::empty()),
    ))
}

/// Deletes an SPU together with its SKUs and their stock rows.
pub async fn delete_spu(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let spu = Spus::find_by_id(id).one(&txn).await?;
    if spu.is_none() {
        return Err(AppError::NotFound);
    }

    let sku_ids: Vec<i32> = Skus::find()
        .select_only()
        .column(SkuCol::Id)
        .filter(SkuCol::SpuId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;

    let stocks = Stocks::delete_many()
        .filter(StockCol::SkuId.is_in(sku_ids.clone()))
        .exec(&txn)
        .await?;
    let skus = Skus::delete_many()
        .filter(SkuCol::SpuId.eq(id))
        .exec(&txn)
        .await?;
    Spus::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        spu_id = id,
        skus = skus.rows_affected,
        stocks = stocks.rows_affected,
        "spu deleted"
    );
    audit::record(
        state,
        Some(user),
        "spu_delete",
        "spus",
        serde_json::json!({ "spu_id": id, "sku_ids": sku_ids }),
    )
    .await;

    Ok(ApiResponse::success(
        "SPU deleted",
        serde_json::json!({
            "id": id,
            "deleted_skus": skus.rows_affected,
            "deleted_stocks": stocks.rows_affected,
        }),
        Some(Meta::empty()),
    ))
}

/// Looks up a category an SPU may be attached to. The outer error is a
/// database failure; the inner one a field error for the form.
async fn leaf_category(
    state: &AppState,
    category_id: i32,
) -> AppResult<Result<CategoryModel, FieldError>> {
    let category = Categories::find_by_id(category_id).one(&state.orm).await?;
    Ok(match category {
        None => Err(FieldError::new(
            "category_id",
            "Selected category does not exist",
        )),
        Some(c) if !c.is_last_level => Err(FieldError::new(
            "category_id",
            "SPUs can only be attached to a last-level category",
        )),
        Some(c) => Ok(c),
    })
}

pub(crate) fn spu_from_entity(model: SpuModel, category: Option<&CategoryModel>) -> Spu {
    Spu {
        id: model.id,
        code: model.code,
        name: model.name,
        remark: model.remark,
        sales_channel: model.sales_channel,
        category_id: model.category_id,
        category_name: category.map(|c| c.name_zh.clone()),
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
