use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::enums::{PlatingProcess, Status};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name_zh: String,
    pub name_en: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<i32>,
    pub rank: i32,
    pub level: i32,
    pub is_last_level: bool,
    pub status: Status,
    /// Names from the root category down to this one.
    pub path: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Spu {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub remark: Option<String>,
    pub sales_channel: String,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Sku {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub spu_id: i32,
    pub spu_code: Option<String>,
    pub spu_name: Option<String>,
    pub provider_name: String,
    pub plating_process: PlatingProcess,
    pub color: String,
    pub material: String,
    #[schema(value_type = String)]
    pub length: Decimal,
    #[schema(value_type = String)]
    pub width: Decimal,
    #[schema(value_type = String)]
    pub height: Decimal,
    #[schema(value_type = String)]
    pub weight: Decimal,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Stock {
    pub id: i32,
    pub sku_id: i32,
    pub sku_code: Option<String>,
    pub sku_name: Option<String>,
    pub quantity: i32,
    pub warehouse: String,
    #[schema(value_type = String)]
    pub average_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact category reference used by form options and list facets.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryOption {
    pub id: i32,
    pub name_zh: String,
    pub name_en: String,
    pub level: i32,
}
