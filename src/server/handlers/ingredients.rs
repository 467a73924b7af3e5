use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::database::entities::{active_ingredients, active_ingredients::Entity as ActiveIngredients};
use crate::errors::AdvisoryError;
use crate::server::app::AppState;
use crate::services::catalog_service::resolve_group;
use crate::services::{CatalogService, IngredientSummary};

#[derive(Serialize, Deserialize)]
pub struct CreateIngredientRequest {
    pub c_name: String,
    pub g_id: String,
    pub action_type: String,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateIngredientRequest {
    pub c_name: String,
    pub g_id: String,
    pub action_type: String,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<IngredientSummary>>, AdvisoryError> {
    let ingredients = CatalogService::new(state.db.clone())
        .ingredients_with_groups()
        .await?;

    Ok(Json(ingredients))
}

pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(payload): Json<CreateIngredientRequest>,
) -> Result<Json<active_ingredients::Model>, AdvisoryError> {
    if payload.c_name.trim().is_empty() {
        return Err(AdvisoryError::invalid_argument("c_name is required"));
    }

    let group = resolve_group(&state.db, &payload.g_id)
        .await?
        .ok_or_else(|| {
            AdvisoryError::invalid_argument(format!("unknown IRAC group '{}'", payload.g_id))
        })?;

    let ingredient = active_ingredients::ActiveModel {
        name: Set(payload.c_name),
        group_id: Set(group.id),
        action_type: Set(payload.action_type),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(ingredient))
}

pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateIngredientRequest>,
) -> Result<Json<active_ingredients::Model>, AdvisoryError> {
    let ingredient = ActiveIngredients::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AdvisoryError::not_found("active ingredient", id))?;

    if payload.c_name.trim().is_empty() {
        return Err(AdvisoryError::invalid_argument("c_name is required"));
    }

    let group = resolve_group(&state.db, &payload.g_id)
        .await?
        .ok_or_else(|| {
            AdvisoryError::invalid_argument(format!("unknown IRAC group '{}'", payload.g_id))
        })?;

    let mut ingredient: active_ingredients::ActiveModel = ingredient.into();
    ingredient.name = Set(payload.c_name);
    ingredient.group_id = Set(group.id);
    ingredient.action_type = Set(payload.action_type);

    let ingredient = ingredient.update(&state.db).await?;

    Ok(Json(ingredient))
}

pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AdvisoryError> {
    CatalogService::new(state.db.clone())
        .delete_ingredient(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
