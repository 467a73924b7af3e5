use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::database::entities::{
    active_ingredients, active_ingredients::Entity as ActiveIngredients, ingredient_efficacy,
    ingredient_efficacy::Entity as IngredientEfficacy, irac_groups,
    irac_groups::Entity as IracGroups, pests::Entity as Pests, trade_products,
    trade_products::Entity as TradeProducts, usage_history,
    usage_history::Entity as UsageHistory,
};
use crate::errors::AdvisoryError;
use crate::services::rotation_service::canonical_group_id;
use crate::services::treatment_service::efficacy_rank;

/// Resolve a group code against the catalog: exact id first, then by
/// canonical form, since legacy rows may store the code padded.
pub async fn resolve_group(
    db: &DatabaseConnection,
    group_id: &str,
) -> Result<Option<irac_groups::Model>, AdvisoryError> {
    if let Some(group) = IracGroups::find_by_id(group_id.to_string()).one(db).await? {
        return Ok(Some(group));
    }

    let wanted = canonical_group_id(group_id);
    if wanted.is_empty() {
        return Ok(None);
    }
    let groups = IracGroups::find().all(db).await?;
    Ok(groups
        .into_iter()
        .find(|group| canonical_group_id(&group.id) == wanted))
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngredientSummary {
    pub c_id: i32,
    pub c_name: String,
    pub g_id: String,
    pub g_name: String,
    pub action_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductSummary {
    pub p_id: i32,
    pub p_name: String,
    pub c_name: String,
    pub irac_group: String,
    pub formulation: Option<String>,
    pub concentration: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PestSolution {
    pub c_name: String,
    pub irac_group: String,
    pub efficacy_level: String,
    pub example_product: Option<String>,
}

/// Joined catalog listings and the referential-integrity checks that
/// guard catalog deletes. Dependents are queried explicitly rather than
/// inferred from backend constraint errors.
pub struct CatalogService {
    db: DatabaseConnection,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn ingredients_with_groups(&self) -> Result<Vec<IngredientSummary>, AdvisoryError> {
        let ingredients = ActiveIngredients::find()
            .order_by_asc(active_ingredients::Column::Name)
            .all(&self.db)
            .await?;
        let groups = self.groups_by_id().await?;

        ingredients
            .into_iter()
            .map(|ingredient| {
                let group = groups
                    .get(&ingredient.group_id)
                    .ok_or_else(|| AdvisoryError::not_found("irac group", &ingredient.group_id))?;
                Ok(IngredientSummary {
                    c_id: ingredient.id,
                    c_name: ingredient.name,
                    g_id: canonical_group_id(&group.id),
                    g_name: group.name.clone(),
                    action_type: ingredient.action_type,
                })
            })
            .collect()
    }

    pub async fn products_with_ingredients(&self) -> Result<Vec<ProductSummary>, AdvisoryError> {
        let products = TradeProducts::find()
            .order_by_asc(trade_products::Column::Name)
            .all(&self.db)
            .await?;
        let ingredients: HashMap<i32, active_ingredients::Model> = ActiveIngredients::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|ingredient| (ingredient.id, ingredient))
            .collect();
        let groups = self.groups_by_id().await?;

        products
            .into_iter()
            .map(|product| {
                let ingredient = ingredients.get(&product.ingredient_id).ok_or_else(|| {
                    AdvisoryError::not_found("active ingredient", product.ingredient_id)
                })?;
                let group = groups
                    .get(&ingredient.group_id)
                    .ok_or_else(|| AdvisoryError::not_found("irac group", &ingredient.group_id))?;
                Ok(ProductSummary {
                    p_id: product.id,
                    p_name: product.name,
                    c_name: ingredient.name.clone(),
                    irac_group: canonical_group_id(&group.id),
                    formulation: product.formulation,
                    concentration: product.concentration,
                })
            })
            .collect()
    }

    /// Flat listing of everything known to work against a pest, with one
    /// example product per ingredient, ordered by efficacy rank.
    pub async fn solutions_for_pest(
        &self,
        pest_id: i32,
    ) -> Result<Vec<PestSolution>, AdvisoryError> {
        let efficacy_rows = IngredientEfficacy::find()
            .filter(ingredient_efficacy::Column::PestId.eq(pest_id))
            .all(&self.db)
            .await?;
        if efficacy_rows.is_empty() {
            return Ok(Vec::new());
        }

        let ingredient_ids: Vec<i32> = efficacy_rows.iter().map(|row| row.ingredient_id).collect();
        let ingredients: HashMap<i32, active_ingredients::Model> = ActiveIngredients::find()
            .filter(active_ingredients::Column::Id.is_in(ingredient_ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|ingredient| (ingredient.id, ingredient))
            .collect();
        let groups = self.groups_by_id().await?;

        // First product by name stands in as the example for its
        // ingredient.
        let products = TradeProducts::find()
            .filter(trade_products::Column::IngredientId.is_in(ingredient_ids))
            .order_by_asc(trade_products::Column::Name)
            .all(&self.db)
            .await?;
        let mut example_products: HashMap<i32, String> = HashMap::new();
        for product in products {
            example_products
                .entry(product.ingredient_id)
                .or_insert(product.name);
        }

        let mut solutions = Vec::new();
        for row in efficacy_rows {
            let ingredient = ingredients.get(&row.ingredient_id).ok_or_else(|| {
                AdvisoryError::not_found("active ingredient", row.ingredient_id)
            })?;
            let group = groups
                .get(&ingredient.group_id)
                .ok_or_else(|| AdvisoryError::not_found("irac group", &ingredient.group_id))?;
            solutions.push(PestSolution {
                c_name: ingredient.name.clone(),
                irac_group: canonical_group_id(&group.id),
                efficacy_level: row.efficacy_level,
                example_product: example_products.get(&ingredient.id).cloned(),
            });
        }

        solutions.sort_by(|a, b| {
            efficacy_rank(&a.efficacy_level)
                .cmp(&efficacy_rank(&b.efficacy_level))
                .then_with(|| a.c_name.cmp(&b.c_name))
        });

        Ok(solutions)
    }

    /// Delete an active ingredient unless products, efficacy entries or
    /// history rows still reference it.
    pub async fn delete_ingredient(&self, ingredient_id: i32) -> Result<(), AdvisoryError> {
        ActiveIngredients::find_by_id(ingredient_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("active ingredient", ingredient_id))?;

        let dependents = self.ingredient_dependents(ingredient_id).await?;
        if let Some(dependents) = dependents {
            return Err(AdvisoryError::ReferentialConflict {
                entity: "active ingredient",
                id: ingredient_id.to_string(),
                dependents,
            });
        }

        ActiveIngredients::delete_by_id(ingredient_id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Delete a pest unless efficacy entries or history rows reference it.
    pub async fn delete_pest(&self, pest_id: i32) -> Result<(), AdvisoryError> {
        Pests::find_by_id(pest_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("pest", pest_id))?;

        let efficacy_count = IngredientEfficacy::find()
            .filter(ingredient_efficacy::Column::PestId.eq(pest_id))
            .count(&self.db)
            .await?;
        let history_count = UsageHistory::find()
            .filter(usage_history::Column::PestId.eq(pest_id))
            .count(&self.db)
            .await?;

        let dependents = if efficacy_count > 0 {
            Some("efficacy entries")
        } else if history_count > 0 {
            Some("usage history")
        } else {
            None
        };
        if let Some(dependents) = dependents {
            return Err(AdvisoryError::ReferentialConflict {
                entity: "pest",
                id: pest_id.to_string(),
                dependents,
            });
        }

        Pests::delete_by_id(pest_id).exec(&self.db).await?;
        Ok(())
    }

    /// Delete a trade product unless history rows reference it.
    pub async fn delete_product(&self, product_id: i32) -> Result<(), AdvisoryError> {
        TradeProducts::find_by_id(product_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("trade product", product_id))?;

        let history_count = UsageHistory::find()
            .filter(usage_history::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await?;
        if history_count > 0 {
            return Err(AdvisoryError::ReferentialConflict {
                entity: "trade product",
                id: product_id.to_string(),
                dependents: "usage history",
            });
        }

        TradeProducts::delete_by_id(product_id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn ingredient_dependents(
        &self,
        ingredient_id: i32,
    ) -> Result<Option<&'static str>, AdvisoryError> {
        let product_count = TradeProducts::find()
            .filter(trade_products::Column::IngredientId.eq(ingredient_id))
            .count(&self.db)
            .await?;
        if product_count > 0 {
            return Ok(Some("trade products"));
        }

        let efficacy_count = IngredientEfficacy::find()
            .filter(ingredient_efficacy::Column::IngredientId.eq(ingredient_id))
            .count(&self.db)
            .await?;
        if efficacy_count > 0 {
            return Ok(Some("efficacy entries"));
        }

        let history_count = UsageHistory::find()
            .filter(usage_history::Column::IngredientId.eq(ingredient_id))
            .count(&self.db)
            .await?;
        if history_count > 0 {
            return Ok(Some("usage history"));
        }

        Ok(None)
    }

    async fn groups_by_id(&self) -> Result<HashMap<String, irac_groups::Model>, AdvisoryError> {
        Ok(IracGroups::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|group| (group.id.clone(), group))
            .collect())
    }
}
