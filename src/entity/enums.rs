use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// Surface finish of a SKU. `None` doubles as the sentinel stored when the
/// field is left blank.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PlatingProcess {
    #[default]
    #[sea_orm(string_value = "none")]
    None,
    #[sea_orm(string_value = "gold")]
    Gold,
    #[sea_orm(string_value = "rose_gold")]
    RoseGold,
    #[sea_orm(string_value = "silver")]
    Silver,
    #[sea_orm(string_value = "rhodium")]
    Rhodium,
}

impl PlatingProcess {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatingProcess::None => "none",
            PlatingProcess::Gold => "gold",
            PlatingProcess::RoseGold => "rose_gold",
            PlatingProcess::Silver => "silver",
            PlatingProcess::Rhodium => "rhodium",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::iter().find(|p| p.as_str() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plating_parses_every_stored_value() {
        for plating in PlatingProcess::iter() {
            assert_eq!(PlatingProcess::parse(plating.as_str()), Some(plating));
        }
        assert_eq!(PlatingProcess::parse("chrome"), None);
    }
}
