use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub pest_type: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ingredient_efficacy::Entity")]
    IngredientEfficacy,
    #[sea_orm(has_many = "super::usage_history::Entity")]
    UsageHistory,
}

impl Related<super::ingredient_efficacy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IngredientEfficacy.def()
    }
}

impl Related<super::usage_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UsageHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
