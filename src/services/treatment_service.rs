use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::database::entities::{
    active_ingredients, active_ingredients::Entity as ActiveIngredients, ingredient_efficacy,
    ingredient_efficacy::Entity as IngredientEfficacy, trade_products,
    trade_products::Entity as TradeProducts,
};
use crate::errors::AdvisoryError;
use crate::services::rotation_service::canonical_group_id;

/// Fixed categorical ordering for efficacy ratings; lower rank sorts
/// first. Anything outside the known vocabulary sorts last.
pub fn efficacy_rank(level: &str) -> u8 {
    match level {
        "high" => 0,
        "medium" => 1,
        "low" => 2,
        "unknown" => 3,
        _ => 4,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngredientOption {
    pub c_id: i32,
    pub c_name: String,
    pub efficacy_level: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductOption {
    pub p_id: i32,
    pub p_name: String,
    pub formulation: Option<String>,
    pub concentration: Option<String>,
}

/// Drill-down queries that take an approved MoA group to a purchasable
/// product. Pure filtered projections; no history involved.
pub struct TreatmentService {
    db: DatabaseConnection,
}

impl TreatmentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Active ingredients in `group_id` with an efficacy entry against
    /// `pest_id`, ordered by efficacy rank (name as tiebreak).
    pub async fn ingredients_for_group(
        &self,
        group_id: &str,
        pest_id: i32,
    ) -> Result<Vec<IngredientOption>, AdvisoryError> {
        let wanted = canonical_group_id(group_id);
        if wanted.is_empty() {
            return Err(AdvisoryError::invalid_argument("group id is required"));
        }

        let efficacy_rows = IngredientEfficacy::find()
            .filter(ingredient_efficacy::Column::PestId.eq(pest_id))
            .all(&self.db)
            .await?;

        let level_by_ingredient: HashMap<i32, String> = efficacy_rows
            .into_iter()
            .map(|row| (row.ingredient_id, row.efficacy_level))
            .collect();
        if level_by_ingredient.is_empty() {
            return Ok(Vec::new());
        }

        let ingredients = ActiveIngredients::find()
            .filter(
                active_ingredients::Column::Id
                    .is_in(level_by_ingredient.keys().copied().collect::<Vec<_>>()),
            )
            .all(&self.db)
            .await?;

        let mut options: Vec<IngredientOption> = ingredients
            .into_iter()
            .filter(|ingredient| canonical_group_id(&ingredient.group_id) == wanted)
            .filter_map(|ingredient| {
                level_by_ingredient
                    .get(&ingredient.id)
                    .map(|level| IngredientOption {
                        c_id: ingredient.id,
                        c_name: ingredient.name,
                        efficacy_level: level.clone(),
                    })
            })
            .collect();

        options.sort_by(|a, b| {
            efficacy_rank(&a.efficacy_level)
                .cmp(&efficacy_rank(&b.efficacy_level))
                .then_with(|| a.c_name.cmp(&b.c_name))
        });

        Ok(options)
    }

    /// All trade products for an ingredient, ordered by name. An unknown
    /// ingredient simply has no products.
    pub async fn products_for_ingredient(
        &self,
        ingredient_id: i32,
    ) -> Result<Vec<ProductOption>, AdvisoryError> {
        let products = TradeProducts::find()
            .filter(trade_products::Column::IngredientId.eq(ingredient_id))
            .order_by_asc(trade_products::Column::Name)
            .all(&self.db)
            .await?;

        Ok(products
            .into_iter()
            .map(|product| ProductOption {
                p_id: product.id,
                p_name: product.name,
                formulation: product.formulation,
                concentration: product.concentration,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficacy_rank_orders_the_fixed_vocabulary() {
        assert!(efficacy_rank("high") < efficacy_rank("medium"));
        assert!(efficacy_rank("medium") < efficacy_rank("low"));
        assert!(efficacy_rank("low") < efficacy_rank("unknown"));
        assert!(efficacy_rank("unknown") < efficacy_rank("not-a-level"));
    }
}
