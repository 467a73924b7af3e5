use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::errors::AdvisoryError;
use crate::server::app::AppState;
use crate::services::{
    IngredientOption, ProductOption, RotationAdvice, RotationService, TreatmentService,
};

/// The rotation engine endpoint: BLOCKED/RECOMMENDED labels for every MoA
/// group effective against the pest, windowed over this user and plot.
pub async fn get_moa_recommendations(
    State(state): State<AppState>,
    Path((user_id, plot_name, pest_id)): Path<(i32, String, i32)>,
) -> Result<Json<RotationAdvice>, AdvisoryError> {
    let advice = RotationService::new(state.db.clone())
        .recommend(user_id, &plot_name, pest_id)
        .await?;

    Ok(Json(advice))
}

/// Drill-down step 1: ingredients in the chosen group effective against
/// the pest, best efficacy first.
pub async fn list_ingredients_for_moa(
    State(state): State<AppState>,
    Path((g_id, pest_id)): Path<(String, i32)>,
) -> Result<Json<Vec<IngredientOption>>, AdvisoryError> {
    let ingredients = TreatmentService::new(state.db.clone())
        .ingredients_for_group(&g_id, pest_id)
        .await?;

    Ok(Json(ingredients))
}

/// Drill-down step 2: branded products for the chosen ingredient.
pub async fn list_products_for_ingredient(
    State(state): State<AppState>,
    Path(c_id): Path<i32>,
) -> Result<Json<Vec<ProductOption>>, AdvisoryError> {
    let products = TreatmentService::new(state.db.clone())
        .products_for_ingredient(c_id)
        .await?;

    Ok(Json(products))
}
