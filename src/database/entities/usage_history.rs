use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only ledger of spray applications. Rows are never updated or
/// deleted; the rotation engine windows over them by `applied_at`
/// descending.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usage_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub plot_name: String,
    pub pest_id: i32,
    pub group_id: String,
    pub ingredient_id: i32,
    pub product_id: i32,
    pub applied_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::pests::Entity",
        from = "Column::PestId",
        to = "super::pests::Column::Id"
    )]
    Pests,
    #[sea_orm(
        belongs_to = "super::irac_groups::Entity",
        from = "Column::GroupId",
        to = "super::irac_groups::Column::Id"
    )]
    IracGroups,
    #[sea_orm(
        belongs_to = "super::active_ingredients::Entity",
        from = "Column::IngredientId",
        to = "super::active_ingredients::Column::Id"
    )]
    ActiveIngredients,
    #[sea_orm(
        belongs_to = "super::trade_products::Entity",
        from = "Column::ProductId",
        to = "super::trade_products::Column::Id"
    )]
    TradeProducts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::pests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pests.def()
    }
}

impl Related<super::irac_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IracGroups.def()
    }
}

impl Related<super::active_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveIngredients.def()
    }
}

impl Related<super::trade_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TradeProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
