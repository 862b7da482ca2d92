use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

use crate::{
    entity::enums::{PlatingProcess, Status},
    models::{CategoryOption, Sku, Spu},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SkuAddQuery {
    pub spu: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSkuRequest {
    #[validate(length(max = 50, message = "Code must be at most 50 characters"))]
    pub code: String,
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(length(max = 100, message = "Provider name is too long"))]
    pub provider_name: Option<String>,
    pub plating_process: Option<String>,
    #[validate(length(max = 50, message = "Color is too long"))]
    pub color: Option<String>,
    #[validate(length(max = 50, message = "Material is too long"))]
    pub material: Option<String>,
    #[schema(value_type = String)]
    pub length: Decimal,
    #[schema(value_type = String)]
    pub width: Decimal,
    #[schema(value_type = String)]
    pub height: Decimal,
    #[schema(value_type = String)]
    pub weight: Decimal,
    #[serde(default)]
    pub status: Status,
}

/// Fields a SKU edit may change. `code` is accepted for form compatibility
/// and never applied; the owning SPU cannot change either.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSkuRequest {
    pub code: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Provider name is too long"))]
    pub provider_name: Option<String>,
    pub plating_process: Option<String>,
    #[validate(length(max = 50, message = "Color is too long"))]
    pub color: Option<String>,
    #[validate(length(max = 50, message = "Material is too long"))]
    pub material: Option<String>,
    #[schema(value_type = Option<String>)]
    pub length: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub width: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub height: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub weight: Option<Decimal>,
    pub status: Option<Status>,
}

/// Distinct values the SKU list can be filtered by.
#[derive(Debug, Serialize, ToSchema)]
pub struct SkuFacets {
    pub categories: Vec<CategoryOption>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub platings: Vec<PlatingProcess>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkuList {
    pub items: Vec<Sku>,
    pub facets: SkuFacets,
}

/// Data the SKU creation form needs for the SPU it was opened from.
#[derive(Debug, Serialize, ToSchema)]
pub struct SkuFormContext {
    pub spu: Spu,
    pub platings: Vec<PlatingProcess>,
    pub statuses: Vec<Status>,
}
