use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::database::entities::{
    active_ingredients::Entity as ActiveIngredients, trade_products,
    trade_products::Entity as TradeProducts,
};
use crate::errors::AdvisoryError;
use crate::server::app::AppState;
use crate::services::{CatalogService, ProductSummary};

#[derive(Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub p_name: String,
    pub c_id: i32,
    pub formulation: Option<String>,
    pub concentration: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub p_name: String,
    pub formulation: Option<String>,
    pub concentration: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductSummary>>, AdvisoryError> {
    let products = CatalogService::new(state.db.clone())
        .products_with_ingredients()
        .await?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<trade_products::Model>, AdvisoryError> {
    if payload.p_name.trim().is_empty() {
        return Err(AdvisoryError::invalid_argument("p_name is required"));
    }

    ActiveIngredients::find_by_id(payload.c_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AdvisoryError::invalid_argument(format!("unknown active ingredient {}", payload.c_id))
        })?;

    let product = trade_products::ActiveModel {
        name: Set(payload.p_name),
        ingredient_id: Set(payload.c_id),
        formulation: Set(payload.formulation),
        concentration: Set(payload.concentration),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<trade_products::Model>, AdvisoryError> {
    let product = TradeProducts::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AdvisoryError::not_found("trade product", id))?;

    if payload.p_name.trim().is_empty() {
        return Err(AdvisoryError::invalid_argument("p_name is required"));
    }

    let mut product: trade_products::ActiveModel = product.into();
    product.name = Set(payload.p_name);
    product.formulation = Set(payload.formulation);
    product.concentration = Set(payload.concentration);

    let product = product.update(&state.db).await?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AdvisoryError> {
    CatalogService::new(state.db.clone())
        .delete_product(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
