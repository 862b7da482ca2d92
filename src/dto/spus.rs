use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

use crate::{
    entity::enums::Status,
    models::{CategoryOption, Spu},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSpuRequest {
    #[validate(length(max = 50, message = "Code must be at most 50 characters"))]
    pub code: String,
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    pub remark: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "Sales channel must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub sales_channel: String,
    pub category_id: i32,
    #[serde(default)]
    pub status: Status,
}

/// Fields an SPU edit may change. `code` is accepted for form compatibility
/// and never applied.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSpuRequest {
    pub code: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    pub remark: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "Sales channel must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub sales_channel: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<Status>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SpuList {
    #[schema(value_type = Vec<Spu>)]
    pub items: Vec<Spu>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpuFormOptions {
    /// Only last-level categories may hold SPUs.
    pub categories: Vec<CategoryOption>,
    pub statuses: Vec<Status>,
}
