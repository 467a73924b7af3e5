use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// IRAC mode-of-action group. The id is the short code growers know
/// ("1A", "28"); legacy imports may carry surrounding whitespace, so ids
/// are trimmed before any comparison.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "irac_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub moa_summary: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::active_ingredients::Entity")]
    ActiveIngredients,
}

impl Related<super::active_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
