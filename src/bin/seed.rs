use catalog_admin_api::{
    catalog::rules::TEXT_SENTINEL,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        Categories, Skus, Spus, Stocks,
        enums::{PlatingProcess, Status},
        categories, skus, spus, stocks,
    },
    middleware::auth::issue_token,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let root = ensure_category(&orm, "首饰", "Jewelry", None, 1, false).await?;
    let leaf = ensure_category(&orm, "项链", "Necklaces", Some(root), 2, true).await?;
    seed_catalog(&orm, leaf).await?;

    let token = issue_token(&config.jwt_secret, Uuid::new_v4(), "staff", Duration::days(7))?;
    println!("Seed completed. Staff token (7 days): {token}");
    Ok(())
}

async fn ensure_category(
    orm: &DatabaseConnection,
    name_zh: &str,
    name_en: &str,
    parent_id: Option<i32>,
    level: i32,
    is_last_level: bool,
) -> anyhow::Result<i32> {
    let existing = Categories::find()
        .filter(categories::Column::NameEn.eq(name_en))
        .one(orm)
        .await?;
    if let Some(category) = existing {
        return Ok(category.id);
    }

    let category = categories::ActiveModel {
        name_zh: Set(name_zh.to_string()),
        name_en: Set(name_en.to_string()),
        description: Set(None),
        image: Set(None),
        parent_id: Set(parent_id),
        rank: Set(0),
        level: Set(level),
        is_last_level: Set(is_last_level),
        status: Set(Status::Active),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(orm)
    .await?;

    println!("Ensured category {name_en} (level={level})");
    Ok(category.id)
}

async fn seed_catalog(orm: &DatabaseConnection, category_id: i32) -> anyhow::Result<()> {
    let spus = vec![
        ("NK01", "Chain necklace", "online"),
        ("NK02", "Pendant necklace", "retail"),
    ];
    let variants = vec![
        ("NK01-G45", "NK01", PlatingProcess::Gold, "gold", "brass", 45),
        ("NK01-S50", "NK01", PlatingProcess::Silver, "silver", "brass", 50),
        ("NK02-R40", "NK02", PlatingProcess::RoseGold, "pink", "copper", 40),
    ];

    let now = Utc::now();
    for (code, name, channel) in spus {
        let exists = Spus::find()
            .filter(spus::Column::Code.eq(code))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        spus::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            remark: Set(None),
            sales_channel: Set(channel.to_string()),
            category_id: Set(category_id),
            status: Set(Status::Active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(orm)
        .await?;
    }

    for (code, spu_code, plating, color, material, length) in variants {
        let exists = Skus::find()
            .filter(skus::Column::Code.eq(code))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        let Some(spu) = Spus::find()
            .filter(spus::Column::Code.eq(spu_code))
            .one(orm)
            .await?
        else {
            continue;
        };

        let sku = skus::ActiveModel {
            code: Set(code.to_string()),
            name: Set(format!("{} {length}cm", spu.name)),
            spu_id: Set(spu.id),
            provider_name: Set(TEXT_SENTINEL.to_string()),
            plating_process: Set(plating),
            color: Set(color.to_string()),
            material: Set(material.to_string()),
            length: Set(Decimal::from(length)),
            width: Set(Decimal::new(50, 2)),
            height: Set(Decimal::new(20, 2)),
            weight: Set(Decimal::new(1250, 2)),
            status: Set(Status::Active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(orm)
        .await?;

        stocks::ActiveModel {
            sku_id: Set(sku.id),
            quantity: Set(25),
            warehouse: Set("main".to_string()),
            average_cost: Set(Decimal::new(3999, 2)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(orm)
        .await?;
    }

    let total = Stocks::find().count(orm).await?;
    println!("Seeded catalog ({total} stock rows)");
    Ok(())
}
