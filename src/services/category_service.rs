use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, Iterable,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    audit,
    catalog::{rules::check_hierarchy, tree::CategoryTree},
    dto::categories::{CategoryFormOptions, CategoryList, CreateCategoryRequest},
    entity::{
        Categories, Spus,
        categories::{ActiveModel, Column, Model as CategoryModel},
        enums::Status,
        spus::Column as SpuCol,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Category, CategoryOption},
    response::{ApiResponse, Meta},
    routes::params::{ListQuery, normalize_page, search_term},
    services::contains_ci,
    state::AppState,
};
use validator::Validate;

pub async fn list_categories(
    state: &AppState,
    query: ListQuery,
) -> AppResult<ApiResponse<CategoryList>> {
    let (page, limit, offset) = normalize_page(query.page);
    let mut condition = Condition::all();

    if let Some(search) = search_term(&query.search) {
        condition = condition.add(
            Condition::any()
                .add(contains_ci((Categories, Column::NameZh), search))
                .add(contains_ci((Categories, Column::NameEn), search)),
        );
    }

    let finder = Categories::find()
        .filter(condition)
        .order_by_asc(Column::Rank)
        .order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let tree = load_tree(state).await?;
    let items = rows
        .into_iter()
        .map(|model| {
            let path = tree.path(model.id);
            category_from_entity(model, path)
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(meta),
    ))
}

pub async fn form_options(state: &AppState) -> AppResult<ApiResponse<CategoryFormOptions>> {
    let parents = Categories::find()
        .order_by_asc(Column::Level)
        .order_by_asc(Column::Rank)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_option)
        .collect();

    let data = CategoryFormOptions {
        parents,
        statuses: Status::iter().collect(),
    };
    Ok(ApiResponse::success("Category form", data, None))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    payload.validate()?;

    let tree = load_tree(state).await?;
    let parent_level = match payload.parent_id {
        Some(parent_id) => {
            let parent = tree.get(parent_id).ok_or_else(|| {
                AppError::field("parent_id", "Selected parent category does not exist")
            })?;
            if tree.has_cycle(parent_id) {
                return Err(AppError::field(
                    "parent_id",
                    "Selected parent category has a cyclic parent chain",
                ));
            }
            Some(parent.level)
        }
        None => None,
    };
    check_hierarchy(parent_level, payload.level)?;

    let mut path = payload
        .parent_id
        .map(|parent_id| tree.path(parent_id))
        .unwrap_or_default();

    let active = ActiveModel {
        id: NotSet,
        name_zh: Set(payload.name_zh.trim().to_string()),
        name_en: Set(payload.name_en.trim().to_string()),
        description: Set(payload.description.filter(|d| !d.trim().is_empty())),
        image: Set(payload.image.filter(|i| !i.trim().is_empty())),
        parent_id: Set(payload.parent_id),
        rank: Set(payload.rank),
        level: Set(payload.level),
        is_last_level: Set(payload.is_last_level),
        status: Set(payload.status),
        created_at: Set(Utc::now().into()),
    };
    let category = active.insert(&state.orm).await?;
    path.push(category.name_zh.clone());

    tracing::info!(category_id = category.id, level = category.level, "category created");
    audit::record(
        state,
        Some(user),
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category, path),
        Some(Meta::empty()),
    ))
}

/// Deletes a category that no longer has sub-categories or SPUs.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    if existing.is_none() {
        return Err(AppError::NotFound);
    }

    let children = Categories::find()
        .filter(Column::ParentId.eq(id))
        .count(&state.orm)
        .await?;
    if children > 0 {
        return Err(AppError::Conflict(format!(
            "Category still has {children} sub-categories"
        )));
    }

    let spus = Spus::find()
        .filter(SpuCol::CategoryId.eq(id))
        .count(&state.orm)
        .await?;
    if spus > 0 {
        return Err(AppError::Conflict(format!("Category still holds {spus} SPUs")));
    }

    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(category_id = id, "category deleted");
    audit::record(
        state,
        Some(user),
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

async fn load_tree(state: &AppState) -> AppResult<CategoryTree> {
    let all = Categories::find().all(&state.orm).await?;
    Ok(CategoryTree::from_models(&all))
}

pub(crate) fn category_option(model: CategoryModel) -> CategoryOption {
    CategoryOption {
        id: model.id,
        name_zh: model.name_zh,
        name_en: model.name_en,
        level: model.level,
    }
}

fn category_from_entity(model: CategoryModel, path: Vec<String>) -> Category {
    Category {
        id: model.id,
        name_zh: model.name_zh,
        name_en: model.name_en,
        description: model.description,
        image: model.image,
        parent_id: model.parent_id,
        rank: model.rank,
        level: model.level,
        is_last_level: model.is_last_level,
        status: model.status,
        path,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
