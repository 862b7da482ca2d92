#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use catalog_admin_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        categories::CreateCategoryRequest,
        skus::CreateSkuRequest,
        spus::CreateSpuRequest,
    },
    entity::{Skus, Spus, enums::Status, skus::Model as SkuModel, spus::Model as SpuModel},
    middleware::auth::AuthUser,
    models::{Category, Spu},
    services::{category_service, sku_service, spu_service},
    state::AppState,
    sync::{ProductSync, SyncError},
};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

/// Sync job double that reports a fixed outcome.
pub struct FakeSync {
    pub synced: Result<u64, String>,
    pub cleaned: Result<(), String>,
}

impl FakeSync {
    pub fn ok(count: u64) -> Self {
        Self {
            synced: Ok(count),
            cleaned: Ok(()),
        }
    }
}

#[async_trait]
impl ProductSync for FakeSync {
    async fn sync_products(&self) -> Result<u64, SyncError> {
        self.synced.clone().map_err(SyncError::Failed)
    }

    async fn clean_old_images(&self) -> Result<(), SyncError> {
        self.cleaned.clone().map_err(SyncError::Failed)
    }
}

pub async fn setup_state() -> anyhow::Result<AppState> {
    setup_state_with_sync(FakeSync::ok(0)).await
}

pub async fn setup_state_with_sync(sync: FakeSync) -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState {
        orm,
        sync: Arc::new(sync),
        jwt_secret: JWT_SECRET.into(),
    })
}

pub fn staff() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "staff".into(),
    }
}

pub fn category_request(
    name: &str,
    parent_id: Option<i32>,
    level: i32,
    leaf: bool,
) -> CreateCategoryRequest {
    CreateCategoryRequest {
        name_zh: name.to_string(),
        name_en: name.to_string(),
        description: None,
        image: None,
        parent_id,
        rank: 0,
        level,
        is_last_level: leaf,
        status: Status::Active,
    }
}

pub fn spu_request(code: &str, name: &str, category_id: i32) -> CreateSpuRequest {
    CreateSpuRequest {
        code: code.to_string(),
        name: name.to_string(),
        remark: None,
        sales_channel: "online".to_string(),
        category_id,
        status: Status::Active,
    }
}

pub fn sku_request(code: &str, name: &str) -> CreateSkuRequest {
    CreateSkuRequest {
        code: code.to_string(),
        name: name.to_string(),
        provider_name: None,
        plating_process: None,
        color: None,
        material: None,
        length: Decimal::new(125, 1),
        width: Decimal::new(5, 1),
        height: Decimal::new(25, 2),
        weight: Decimal::new(35, 1),
        status: Status::Active,
    }
}

/// Creates a root category with one last-level child and returns both.
pub async fn seed_categories(state: &AppState) -> anyhow::Result<(Category, Category)> {
    let user = staff();
    let root = category_service::create_category(
        state,
        &user,
        category_request("Jewelry", None, 1, false),
    )
    .await?
    .data
    .expect("root category");
    let leaf = category_service::create_category(
        state,
        &user,
        category_request("Rings", Some(root.id), 2, true),
    )
    .await?
    .data
    .expect("leaf category");
    Ok((root, leaf))
}

pub async fn seed_spu(state: &AppState, code: &str, category_id: i32) -> anyhow::Result<Spu> {
    let spu = spu_service::create_spu(state, &staff(), spu_request(code, "Band ring", category_id))
        .await?
        .data
        .expect("spu");
    Ok(spu)
}

pub async fn spu_model(state: &AppState, id: i32) -> anyhow::Result<SpuModel> {
    let spu = Spus::find_by_id(id).one(&state.orm).await?.expect("spu row");
    Ok(spu)
}

pub async fn seed_sku(
    state: &AppState,
    spu_id: i32,
    request: CreateSkuRequest,
) -> anyhow::Result<SkuModel> {
    let spu = spu_model(state, spu_id).await?;
    let sku = sku_service::create_sku(state, &staff(), spu, request)
        .await?
        .data
        .expect("sku");
    let model = Skus::find_by_id(sku.id)
        .one(&state.orm)
        .await?
        .expect("sku row");
    Ok(model)
}
