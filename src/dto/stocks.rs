use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

use crate::models::Stock;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStockRequest {
    #[serde(default)]
    pub quantity: i32,
    #[validate(
        length(min = 1, max = 100, message = "Warehouse must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub warehouse: String,
    #[serde(default)]
    #[schema(value_type = String)]
    pub average_cost: Decimal,
    pub sku_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct StockList {
    #[schema(value_type = Vec<Stock>)]
    pub items: Vec<Stock>,
}
