use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::database::entities::{
    active_ingredients, active_ingredients::Entity as ActiveIngredients, pests,
    pests::Entity as Pests, trade_products, trade_products::Entity as TradeProducts,
    usage_history, usage_history::Entity as UsageHistory, users::Entity as Users,
};
use crate::errors::AdvisoryError;
use crate::services::catalog_service::resolve_group;

/// Request body for recording one spray application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewApplication {
    pub user_id: i32,
    pub plot_name: String,
    pub pest_id: i32,
    pub g_id: String,
    pub c_id: i32,
    pub p_id: i32,
}

/// One ledger row joined with the names a grower recognizes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i32,
    pub plot_name: String,
    pub pest_id: i32,
    pub pest_name: String,
    pub g_id: String,
    pub c_id: i32,
    pub c_name: String,
    pub p_id: i32,
    pub p_name: String,
    pub applied_at: DateTime<Utc>,
}

/// Writer and reader for the append-only usage ledger. The only mutating
/// operation in the whole advisory core.
pub struct HistoryService {
    db: DatabaseConnection,
}

impl HistoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one immutable history row stamped with the current time.
    /// The group code is resolved through the catalog so the stored id is
    /// the catalog's own (the rotation engine trims on read, keeping the
    /// two sides of the comparison consistent).
    pub async fn record_application(
        &self,
        application: NewApplication,
    ) -> Result<i32, AdvisoryError> {
        if application.user_id <= 0 {
            return Err(AdvisoryError::invalid_argument("user_id is required"));
        }
        if application.plot_name.trim().is_empty() {
            return Err(AdvisoryError::invalid_argument("plot_name is required"));
        }

        Users::find_by_id(application.user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("user", application.user_id))?;
        Pests::find_by_id(application.pest_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("pest", application.pest_id))?;
        let group = resolve_group(&self.db, &application.g_id)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("irac group", &application.g_id))?;
        ActiveIngredients::find_by_id(application.c_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("active ingredient", application.c_id))?;
        TradeProducts::find_by_id(application.p_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvisoryError::not_found("trade product", application.p_id))?;

        let entry = usage_history::ActiveModel {
            user_id: Set(application.user_id),
            plot_name: Set(application.plot_name),
            pest_id: Set(application.pest_id),
            group_id: Set(group.id),
            ingredient_id: Set(application.c_id),
            product_id: Set(application.p_id),
            applied_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(entry.id)
    }

    /// The user's full ledger, newest first, joined with pest, ingredient
    /// and product names.
    pub async fn history_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ApplicationRecord>, AdvisoryError> {
        let rows = UsageHistory::find()
            .filter(usage_history::Column::UserId.eq(user_id))
            .order_by_desc(usage_history::Column::AppliedAt)
            .all(&self.db)
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let pest_ids: Vec<i32> = rows.iter().map(|row| row.pest_id).collect();
        let ingredient_ids: Vec<i32> = rows.iter().map(|row| row.ingredient_id).collect();
        let product_ids: Vec<i32> = rows.iter().map(|row| row.product_id).collect();

        let pest_names: HashMap<i32, String> = Pests::find()
            .filter(pests::Column::Id.is_in(pest_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|pest| (pest.id, pest.name))
            .collect();
        let ingredient_names: HashMap<i32, String> = ActiveIngredients::find()
            .filter(active_ingredients::Column::Id.is_in(ingredient_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|ingredient| (ingredient.id, ingredient.name))
            .collect();
        let product_names: HashMap<i32, String> = TradeProducts::find()
            .filter(trade_products::Column::Id.is_in(product_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|product| (product.id, product.name))
            .collect();

        rows.into_iter()
            .map(|row| {
                let pest_name = pest_names
                    .get(&row.pest_id)
                    .ok_or_else(|| AdvisoryError::not_found("pest", row.pest_id))?;
                let c_name = ingredient_names
                    .get(&row.ingredient_id)
                    .ok_or_else(|| AdvisoryError::not_found("active ingredient", row.ingredient_id))?;
                let p_name = product_names
                    .get(&row.product_id)
                    .ok_or_else(|| AdvisoryError::not_found("trade product", row.product_id))?;
                Ok(ApplicationRecord {
                    id: row.id,
                    plot_name: row.plot_name,
                    pest_id: row.pest_id,
                    pest_name: pest_name.clone(),
                    g_id: crate::services::rotation_service::canonical_group_id(&row.group_id),
                    c_id: row.ingredient_id,
                    c_name: c_name.clone(),
                    p_id: row.product_id,
                    p_name: p_name.clone(),
                    applied_at: row.applied_at,
                })
            })
            .collect()
    }
}
