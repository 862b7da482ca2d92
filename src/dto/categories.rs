use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

use crate::{
    entity::enums::Status,
    models::{Category, CategoryOption},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub name_zh: String,
    #[validate(
        length(min = 1, max = 100, message = "English name must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub name_en: String,
    pub description: Option<String>,
    #[validate(length(max = 255, message = "Image reference is too long"))]
    pub image: Option<String>,
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub rank: i32,
    #[validate(range(min = 1, message = "Level must be at least 1"))]
    pub level: i32,
    #[serde(default)]
    pub is_last_level: bool,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

/// Choices the category form offers.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryFormOptions {
    pub parents: Vec<CategoryOption>,
    pub statuses: Vec<Status>,
}
