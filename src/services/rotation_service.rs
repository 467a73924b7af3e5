use std::collections::HashSet;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::database::entities::{
    active_ingredients, active_ingredients::Entity as ActiveIngredients, ingredient_efficacy,
    ingredient_efficacy::Entity as IngredientEfficacy, irac_groups,
    irac_groups::Entity as IracGroups, usage_history, usage_history::Entity as UsageHistory,
};
use crate::errors::AdvisoryError;

/// Number of most recent applications that block a mode of action from
/// being reused on the same user/plot/pest combination.
pub const ROTATION_WINDOW: u64 = 3;

/// Canonical form of an IRAC group code. Legacy catalog rows store the
/// code padded, so every comparison goes through this one function.
pub fn canonical_group_id(raw: &str) -> String {
    raw.trim().to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationStatus {
    Blocked,
    Recommended,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupRecommendation {
    pub g_id: String,
    pub g_name: String,
    pub moa_summary: String,
    pub status: RecommendationStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RotationAdvice {
    /// Group codes of the last applications, newest first, repeats kept.
    pub recent_history: Vec<String>,
    pub recommendations: Vec<GroupRecommendation>,
}

/// The resistance-rotation recommendation engine. Stateless; every call
/// reads the history window and the efficacy universe and joins them in
/// memory.
pub struct RotationService {
    db: DatabaseConnection,
}

impl RotationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Label every MoA group effective against `pest_id` as BLOCKED or
    /// RECOMMENDED for this user and plot.
    ///
    /// A failure on either read aborts the whole call; a partial answer
    /// could present a blocked group as safe.
    pub async fn recommend(
        &self,
        user_id: i32,
        plot_name: &str,
        pest_id: i32,
    ) -> Result<RotationAdvice, AdvisoryError> {
        if user_id <= 0 {
            return Err(AdvisoryError::invalid_argument("user_id is required"));
        }
        if plot_name.trim().is_empty() {
            return Err(AdvisoryError::invalid_argument("plot_name is required"));
        }

        // The window and the candidate universe touch disjoint tables, so
        // the two reads are issued concurrently.
        let (recent_history, universe) = tokio::try_join!(
            self.recent_group_window(user_id, plot_name, pest_id),
            self.effective_groups(pest_id),
        )?;

        let recommendations = label_groups(universe, &recent_history);

        Ok(RotationAdvice {
            recent_history,
            recommendations,
        })
    }

    /// The K most recent group codes for exactly this user/plot/pest,
    /// newest first, canonicalized.
    async fn recent_group_window(
        &self,
        user_id: i32,
        plot_name: &str,
        pest_id: i32,
    ) -> Result<Vec<String>, AdvisoryError> {
        let rows = UsageHistory::find()
            .filter(usage_history::Column::UserId.eq(user_id))
            .filter(usage_history::Column::PlotName.eq(plot_name))
            .filter(usage_history::Column::PestId.eq(pest_id))
            .order_by_desc(usage_history::Column::AppliedAt)
            .limit(ROTATION_WINDOW)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| canonical_group_id(&row.group_id))
            .collect())
    }

    /// Distinct IRAC groups with any efficacy entry against the pest,
    /// independent of any user's history. Assembled from the catalog
    /// tables in memory. An unknown pest yields an empty universe.
    async fn effective_groups(
        &self,
        pest_id: i32,
    ) -> Result<Vec<irac_groups::Model>, AdvisoryError> {
        let efficacy_rows = IngredientEfficacy::find()
            .filter(ingredient_efficacy::Column::PestId.eq(pest_id))
            .all(&self.db)
            .await?;

        let ingredient_ids: Vec<i32> = efficacy_rows
            .iter()
            .map(|row| row.ingredient_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if ingredient_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ingredients = ActiveIngredients::find()
            .filter(active_ingredients::Column::Id.is_in(ingredient_ids))
            .all(&self.db)
            .await?;

        let group_ids: Vec<String> = ingredients
            .into_iter()
            .map(|ingredient| ingredient.group_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let groups = IracGroups::find()
            .filter(irac_groups::Column::Id.is_in(group_ids))
            .all(&self.db)
            .await?;

        Ok(groups)
    }
}

/// Partition the candidate universe against the recent window. Group ids
/// are compared in canonical form; a universe that reaches the same
/// canonical code through differently padded rows collapses to one entry.
fn label_groups(
    universe: Vec<irac_groups::Model>,
    recent_history: &[String],
) -> Vec<GroupRecommendation> {
    let blocked: HashSet<&str> = recent_history.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let mut recommendations = Vec::new();
    for group in universe {
        let g_id = canonical_group_id(&group.id);
        if !seen.insert(g_id.clone()) {
            continue;
        }
        let status = if blocked.contains(g_id.as_str()) {
            RecommendationStatus::Blocked
        } else {
            RecommendationStatus::Recommended
        };
        recommendations.push(GroupRecommendation {
            g_id,
            g_name: group.name,
            moa_summary: group.moa_summary,
            status,
        });
    }
    recommendations
}
