use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One cell of the ingredient-by-pest efficacy matrix.
/// `efficacy_level` is one of "high", "medium", "low", "unknown".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient_efficacy")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ingredient_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub pest_id: i32,
    pub efficacy_level: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::active_ingredients::Entity",
        from = "Column::IngredientId",
        to = "super::active_ingredients::Column::Id"
    )]
    ActiveIngredients,
    #[sea_orm(
        belongs_to = "super::pests::Entity",
        from = "Column::PestId",
        to = "super::pests::Column::Id"
    )]
    Pests,
}

impl Related<super::active_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveIngredients.def()
    }
}

impl Related<super::pests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
