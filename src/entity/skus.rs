use sea_orm::entity::prelude::*;

use super::enums::{PlatingProcess, Status};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "skus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub spu_id: i32,
    pub provider_name: String,
    pub plating_process: PlatingProcess,
    pub color: String,
    pub material: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub length: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub width: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub height: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub weight: Decimal,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spus::Entity",
        from = "Column::SpuId",
        to = "super::spus::Column::Id",
        on_delete = "Cascade"
    )]
    Spus,
    #[sea_orm(has_many = "super::stocks::Entity")]
    Stocks,
}

impl Related<super::spus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spus.def()
    }
}

impl Related<super::stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stocks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
