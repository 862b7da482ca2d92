use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use validator::Validate;

use crate::{
    audit,
    dto::stocks::{StockList, UpdateStockRequest},
    entity::{
        Skus, Stocks,
        skus::Model as SkuModel,
        stocks::{ActiveModel, Column, Model as StockModel},
    },
    error::{AppError, AppResult, FieldError},
    models::Stock,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Largest magnitude that fits ten digits with two decimal places.
fn max_average_cost() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

pub async fn list_stocks(state: &AppState) -> AppResult<ApiResponse<StockList>> {
    let items: Vec<Stock> = Stocks::find()
        .find_also_related(Skus)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(stock, sku)| stock_from_entity(stock, sku.as_ref()))
        .collect();

    let total = items.len() as i64;
    let meta = Meta {
        total: Some(total),
        ..Meta::empty()
    };
    Ok(ApiResponse::success("Stocks", StockList { items }, Some(meta)))
}

pub async fn get_stock(state: &AppState, id: i32) -> AppResult<ApiResponse<Stock>> {
    let result = Stocks::find_by_id(id)
        .find_also_related(Skus)
        .one(&state.orm)
        .await?;
    let (stock, sku) = match result {
        Some(row) => row,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Stock",
        stock_from_entity(stock, sku.as_ref()),
        None,
    ))
}

pub async fn update_stock(
    state: &AppState,
    id: i32,
    payload: UpdateStockRequest,
) -> AppResult<ApiResponse<Stock>> {
    payload.validate()?;

    let existing = Stocks::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut errors = Vec::new();
    let average_cost = payload.average_cost;
    if average_cost.round_dp(2) != average_cost {
        errors.push(FieldError::new(
            "average_cost",
            "Average cost allows at most 2 decimal places",
        ));
    }
    if average_cost.abs() > max_average_cost() {
        errors.push(FieldError::new(
            "average_cost",
            "Average cost allows at most 10 digits",
        ));
    }

    let sku = Skus::find_by_id(payload.sku_id).one(&state.orm).await?;
    if sku.is_none() {
        errors.push(FieldError::new("sku_id", "Selected SKU does not exist"));
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut active: ActiveModel = existing.into();
    active.quantity = Set(payload.quantity);
    active.warehouse = Set(payload.warehouse.trim().to_string());
    active.average_cost = Set(average_cost.round_dp(2));
    active.sku_id = Set(payload.sku_id);
    active.updated_at = Set(Utc::now().into());

    let stock = active.update(&state.orm).await?;

    tracing::info!(stock_id = stock.id, quantity = stock.quantity, "stock updated");
    audit::record(
        state,
        None,
        "stock_update",
        "stocks",
        serde_json::json!({ "stock_id": stock.id, "quantity": stock.quantity }),
    )
    .await;

    Ok(ApiResponse::success(
        "Stock updated",
        stock_from_entity(stock, sku.as_ref()),
        Some(Meta::empty()),
    ))
}

pub async fn delete_stock(state: &AppState, id: i32) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Stocks::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(stock_id = id, "stock deleted");
    audit::record(
        state,
        None,
        "stock_delete",
        "stocks",
        serde_json::json!({ "stock_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Stock deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

fn stock_from_entity(model: StockModel, sku: Option<&SkuModel>) -> Stock {
    Stock {
        id: model.id,
        sku_id: model.sku_id,
        sku_code: sku.map(|s| s.code.clone()),
        sku_name: sku.map(|s| s.name.clone()),
        quantity: model.quantity,
        warehouse: model.warehouse,
        average_cost: model.average_cost,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
