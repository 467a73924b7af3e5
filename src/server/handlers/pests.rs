use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::database::entities::{pests, pests::Entity as Pests};
use crate::errors::AdvisoryError;
use crate::server::app::AppState;
use crate::services::{CatalogService, PestSolution};

#[derive(Serialize, Deserialize)]
pub struct CreatePestRequest {
    pub pest_name: String,
    pub pest_type: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct UpdatePestRequest {
    pub pest_name: String,
    pub pest_type: String,
    pub description: Option<String>,
}

pub async fn list_pests(
    State(state): State<AppState>,
) -> Result<Json<Vec<pests::Model>>, AdvisoryError> {
    let pests = Pests::find()
        .order_by_asc(pests::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(pests))
}

pub async fn get_pest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<pests::Model>, AdvisoryError> {
    let pest = Pests::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AdvisoryError::not_found("pest", id))?;

    Ok(Json(pest))
}

pub async fn create_pest(
    State(state): State<AppState>,
    Json(payload): Json<CreatePestRequest>,
) -> Result<Json<pests::Model>, AdvisoryError> {
    if payload.pest_name.trim().is_empty() {
        return Err(AdvisoryError::invalid_argument("pest_name is required"));
    }
    if payload.pest_type.trim().is_empty() {
        return Err(AdvisoryError::invalid_argument("pest_type is required"));
    }

    let pest = pests::ActiveModel {
        name: Set(payload.pest_name),
        pest_type: Set(payload.pest_type),
        description: Set(payload.description),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(pest))
}

pub async fn update_pest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePestRequest>,
) -> Result<Json<pests::Model>, AdvisoryError> {
    let pest = Pests::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AdvisoryError::not_found("pest", id))?;

    if payload.pest_name.trim().is_empty() {
        return Err(AdvisoryError::invalid_argument("pest_name is required"));
    }

    let mut pest: pests::ActiveModel = pest.into();
    pest.name = Set(payload.pest_name);
    pest.pest_type = Set(payload.pest_type);
    pest.description = Set(payload.description);

    let pest = pest.update(&state.db).await?;

    Ok(Json(pest))
}

pub async fn delete_pest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AdvisoryError> {
    CatalogService::new(state.db.clone()).delete_pest(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Legacy flat listing: every ingredient known to work on the pest with
/// its group, efficacy and an example product.
pub async fn list_solutions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<PestSolution>>, AdvisoryError> {
    let solutions = CatalogService::new(state.db.clone())
        .solutions_for_pest(id)
        .await?;

    Ok(Json(solutions))
}
