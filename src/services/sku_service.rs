use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, Iterable,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait, sea_query::Query,
};
use validator::Validate;

use crate::{
    audit,
    catalog::rules::{SkuAttributes, check_new_code, plating_or_sentinel, text_or_sentinel},
    dto::skus::{CreateSkuRequest, SkuFacets, SkuFormContext, SkuList, UpdateSkuRequest},
    entity::{
        Categories, Skus, Spus, Stocks,
        categories::{self, Column as CategoryCol},
        enums::{PlatingProcess, Status},
        skus::{ActiveModel, Column, Model as SkuModel},
        spus::{self, Model as SpuModel},
        stocks::Column as StockCol,
    },
    error::{AppError, AppResult, FieldError},
    middleware::auth::AuthUser,
    models::Sku,
    response::{ApiResponse, Meta},
    routes::params::{SkuListQuery, normalize_page, search_term},
    services::{category_service::category_option, contains_ci, spu_service::spu_from_entity},
    state::AppState,
};

pub async fn list_skus(state: &AppState, query: SkuListQuery) -> AppResult<ApiResponse<SkuList>> {
    let (page, limit, offset) = normalize_page(query.page);
    let mut condition = Condition::all();

    if let Some(category_id) = query.category_id() {
        condition = condition.add(
            Column::SpuId.in_subquery(
                Query::select()
                    .column(spus::Column::Id)
                    .from(Spus)
                    .and_where(spus::Column::CategoryId.eq(category_id))
                    .to_owned(),
            ),
        );
    }

    if let Some(search) = search_term(&query.search) {
        condition = condition.add(
            Condition::any()
                .add(contains_ci((Skus, Column::Name), search))
                .add(contains_ci((Skus, Column::Code), search)),
        );
    }

    if let Some(color) = search_term(&query.color) {
        condition = condition.add(Column::Color.eq(color));
    }
    if let Some(material) = search_term(&query.material) {
        condition = condition.add(Column::Material.eq(material));
    }
    if let Some(plating) = search_term(&query.plating) {
        condition = condition.add(Column::PlatingProcess.eq(plating));
    }

    let finder = Skus::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .find_also_related(Spus)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(sku, spu)| sku_from_entity(sku, spu.as_ref()))
        .collect();

    let facets = load_facets(state).await?;
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "SKUs",
        SkuList { items, facets },
        Some(meta),
    ))
}

async fn distinct_values(state: &AppState, column: Column) -> AppResult<Vec<String>> {
    let values = Skus::find()
        .select_only()
        .column(column)
        .distinct()
        .order_by_asc(column)
        .into_tuple::<String>()
        .all(&state.orm)
        .await?;
    Ok(values)
}

async fn load_facets(state: &AppState) -> AppResult<SkuFacets> {
    let colors = distinct_values(state, Column::Color).await?;
    let materials = distinct_values(state, Column::Material).await?;
    let platings = distinct_values(state, Column::PlatingProcess)
        .await?
        .iter()
        .filter_map(|p| PlatingProcess::parse(p))
        .collect();

    let categories = Categories::find()
        .join(JoinType::InnerJoin, categories::Relation::Spus.def())
        .join(JoinType::InnerJoin, spus::Relation::Skus.def())
        .distinct()
        .order_by_asc(CategoryCol::NameEn)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_option)
        .collect();

    Ok(SkuFacets {
        categories,
        colors,
        materials,
        platings,
    })
}

/// Resolves the `spu` query parameter SKU creation is scoped to.
/// A missing value is a bad request; an unparsable or unknown id is not found.
pub async fn resolve_spu(state: &AppState, spu: Option<&str>) -> AppResult<SpuModel> {
    let raw = spu.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        AppError::BadRequest("Add SKUs from an SPU's detail page".into())
    })?;
    let id = raw.parse::<i32>().map_err(|_| AppError::NotFound)?;

    Spus::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn add_context(state: &AppState, spu: SpuModel) -> AppResult<ApiResponse<SkuFormContext>> {
    let category = Categories::find_by_id(spu.category_id).one(&state.orm).await?;
    let data = SkuFormContext {
        spu: spu_from_entity(spu, category.as_ref()),
        platings: PlatingProcess::iter().collect(),
        statuses: Status::iter().collect(),
    };
    Ok(ApiResponse::success("SKU form", data, None))
}

pub async fn create_sku(
    state: &AppState,
    user: &AuthUser,
    spu: SpuModel,
    payload: CreateSkuRequest,
) -> AppResult<ApiResponse<Sku>> {
    payload.validate()?;
    let mut errors = Vec::new();

    let code = match check_new_code(&payload.code) {
        Ok(code) => {
            let taken = Skus::find()
                .filter(Column::Code.eq(code.as_str()))
                .count(&state.orm)
                .await?;
            if taken > 0 {
                errors.push(FieldError::new("code", "SKU code already exists"));
            }
            code
        }
        Err(err) => {
            errors.push(err);
            String::new()
        }
    };

    let attributes = match SkuAttributes::normalize(
        payload.provider_name,
        payload.plating_process,
        payload.color,
        payload.material,
    ) {
        Ok(attributes) => Some(attributes),
        Err(err) => {
            errors.push(err);
            None
        }
    };

    for (field, value) in [
        ("length", payload.length),
        ("width", payload.width),
        ("height", payload.height),
        ("weight", payload.weight),
    ] {
        if let Err(err) = check_measure(field, value) {
            errors.push(err);
        }
    }

    let attributes = match attributes {
        Some(attributes) if errors.is_empty() => attributes,
        _ => return Err(AppError::Validation(errors)),
    };

    let now = Utc::now();
    let active = ActiveModel {
        id: NotSet,
        code: Set(code),
        name: Set(payload.name.trim().to_string()),
        spu_id: Set(spu.id),
        provider_name: Set(attributes.provider_name),
        plating_process: Set(attributes.plating_process),
        color: Set(attributes.color),
        material: Set(attributes.material),
        length: Set(payload.length),
        width: Set(payload.width),
        height: Set(payload.height),
        weight: Set(payload.weight),
        status: Set(payload.status),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let sku = active.insert(&state.orm).await?;

    tracing::info!(sku_id = sku.id, spu_id = spu.id, code = %sku.code, "sku created");
    audit::record(
        state,
        Some(user),
        "sku_create",
        "skus",
        serde_json::json!({ "sku_id": sku.id, "spu_id": spu.id, "code": sku.code }),
    )
    .await;

    Ok(ApiResponse::success(
        "SKU created",
        sku_from_entity(sku, Some(&spu)),
        Some(Meta::empty()),
    ))
}

pub async fn get_sku(state: &AppState, id: i32) -> AppResult<ApiResponse<Sku>> {
    let (sku, spu) = Skus::find_by_id(id)
        .find_also_related(Spus)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success("SKU", sku_from_entity(sku, spu.as_ref()), None))
}

/// Applies an edit. The stored code and owning SPU are kept whatever the
/// request carries; optional attributes submitted blank become sentinels.
pub async fn update_sku(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateSkuRequest,
) -> AppResult<ApiResponse<Sku>> {
    payload.validate()?;

    let (existing, spu) = Skus::find_by_id(id)
        .find_also_related(Spus)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if payload.code.as_deref().is_some_and(|c| c.trim() != existing.code) {
        tracing::debug!(sku_id = id, "ignoring submitted SKU code change");
    }

    let mut errors = Vec::new();
    let plating = match payload.plating_process.map(|p| plating_or_sentinel(Some(p))) {
        Some(Ok(plating)) => Some(plating),
        Some(Err(err)) => {
            errors.push(err);
            None
        }
        None => None,
    };

    let measures = [
        ("length", payload.length),
        ("width", payload.width),
        ("height", payload.height),
        ("weight", payload.weight),
    ];
    for (field, value) in measures {
        if let Some(Err(err)) = value.map(|v| check_measure(field, v)) {
            errors.push(err);
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(provider_name) = payload.provider_name {
        active.provider_name = Set(text_or_sentinel(Some(provider_name)));
    }
    if let Some(plating) = plating {
        active.plating_process = Set(plating);
    }
    if let Some(color) = payload.color {
        active.color = Set(text_or_sentinel(Some(color)));
    }
    if let Some(material) = payload.material {
        active.material = Set(text_or_sentinel(Some(material)));
    }
    if let Some(length) = payload.length {
        active.length = Set(length);
    }
    if let Some(width) = payload.width {
        active.width = Set(width);
    }
    if let Some(height) = payload.height {
        active.height = Set(height);
    }
    if let Some(weight) = payload.weight {
        active.weight = Set(weight);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let sku = active.update(&state.orm).await?;

    tracing::info!(sku_id = sku.id, "sku updated");
    audit::record(
        state,
        Some(user),
        "sku_update",
        "skus",
        serde_json::json!({ "sku_id": sku.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "SKU updated",
        sku_from_entity(sku, spu.as_ref()),
        Some(Meta::empty()),
    ))
}

/// Deletes a SKU together with its stock rows.
pub async fn delete_sku(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let sku = Skus::find_by_id(id).one(&txn).await?;
    if sku.is_none() {
        return Err(AppError::NotFound);
    }

    let stocks = Stocks::delete_many()
        .filter(StockCol::SkuId.eq(id))
        .exec(&txn)
        .await?;
    Skus::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(sku_id = id, stocks = stocks.rows_affected, "sku deleted");
    audit::record(
        state,
        Some(user),
        "sku_delete",
        "skus",
        serde_json::json!({ "sku_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "SKU deleted",
        serde_json::json!({ "id": id, "deleted_stocks": stocks.rows_affected }),
        Some(Meta::empty()),
    ))
}

fn check_measure(field: &str, value: Decimal) -> Result<(), FieldError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FieldError::new(field, format!("{field} must not be negative")));
    }
    Ok(())
}

pub(crate) fn sku_from_entity(model: SkuModel, spu: Option<&SpuModel>) -> Sku {
    Sku {
        id: model.id,
        code: model.code,
        name: model.name,
        spu_id: model.spu_id,
        spu_code: spu.map(|s| s.code.clone()),
        spu_name: spu.map(|s| s.name.clone()),
        provider_name: model.provider_name,
        plating_process: model.plating_process,
        color: model.color,
        material: model.material,
        length: model.length,
        width: model.width,
        height: model.height,
        weight: model.weight,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
