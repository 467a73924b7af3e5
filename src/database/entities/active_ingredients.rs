use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "active_ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub group_id: String,
    pub action_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::irac_groups::Entity",
        from = "Column::GroupId",
        to = "super::irac_groups::Column::Id"
    )]
    IracGroups,
    #[sea_orm(has_many = "super::trade_products::Entity")]
    TradeProducts,
    #[sea_orm(has_many = "super::ingredient_efficacy::Entity")]
    IngredientEfficacy,
}

impl Related<super::irac_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IracGroups.def()
    }
}

impl Related<super::trade_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TradeProducts.def()
    }
}

impl Related<super::ingredient_efficacy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IngredientEfficacy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
