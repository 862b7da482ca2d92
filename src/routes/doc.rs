use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        categories::{CategoryFormOptions, CategoryList, CreateCategoryRequest},
        skus::{CreateSkuRequest, SkuFacets, SkuFormContext, SkuList, UpdateSkuRequest},
        spus::{CreateSpuRequest, SpuFormOptions, SpuList, UpdateSpuRequest},
        stocks::{StockList, UpdateStockRequest},
    },
    entity::enums::{PlatingProcess, Status},
    error::FieldError,
    models::{Category, CategoryOption, Sku, Spu, Stock},
    response::{ApiResponse, FlashData, FlashLevel, Meta},
    routes::{categories, health, params, skus, spus, stocks},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        categories::list_categories,
        categories::category_form,
        categories::create_category,
        categories::delete_category,
        spus::list_spus,
        spus::spu_form,
        spus::create_spu,
        spus::get_spu,
        spus::update_spu,
        spus::delete_spu,
        skus::list_skus,
        skus::sku_form,
        skus::create_sku,
        skus::get_sku,
        skus::update_sku,
        skus::delete_sku,
        skus::sync_skus,
        stocks::list_stocks,
        stocks::get_stock,
        stocks::stock_form,
        stocks::update_stock,
        stocks::delete_stock
    ),
    components(
        schemas(
            Category,
            CategoryOption,
            Spu,
            Sku,
            Stock,
            Status,
            PlatingProcess,
            FieldError,
            FlashLevel,
            FlashData,
            CreateCategoryRequest,
            CategoryList,
            CategoryFormOptions,
            CreateSpuRequest,
            UpdateSpuRequest,
            SpuList,
            SpuFormOptions,
            CreateSkuRequest,
            UpdateSkuRequest,
            SkuList,
            SkuFacets,
            SkuFormContext,
            UpdateStockRequest,
            StockList,
            params::ListQuery,
            params::SkuListQuery,
            Meta,
            ApiResponse<Category>,
            ApiResponse<CategoryList>,
            ApiResponse<Spu>,
            ApiResponse<SpuList>,
            ApiResponse<Sku>,
            ApiResponse<SkuList>,
            ApiResponse<Stock>,
            ApiResponse<StockList>,
            ApiResponse<FlashData>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Categories", description = "Category hierarchy endpoints"),
        (name = "SPUs", description = "Generic product endpoints"),
        (name = "SKUs", description = "Sellable variant endpoints"),
        (name = "Stocks", description = "Warehouse stock endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
