use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trade_products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub ingredient_id: i32,
    pub formulation: Option<String>,
    pub concentration: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::active_ingredients::Entity",
        from = "Column::IngredientId",
        to = "super::active_ingredients::Column::Id"
    )]
    ActiveIngredients,
}

impl Related<super::active_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
