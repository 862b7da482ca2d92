use sea_orm::entity::prelude::*;

use super::enums::Status;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Restrict"
    )]
    Parent,
    #[sea_orm(has_many = "super::spus::Entity")]
    Spus,
}

impl Related<super::spus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
