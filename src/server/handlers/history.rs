use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::errors::AdvisoryError;
use crate::server::app::AppState;
use crate::services::{ApplicationRecord, HistoryService, NewApplication};

pub async fn record_application(
    State(state): State<AppState>,
    Json(payload): Json<NewApplication>,
) -> Result<(StatusCode, Json<Value>), AdvisoryError> {
    let id = HistoryService::new(state.db.clone())
        .record_application(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn list_user_history(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<ApplicationRecord>>, AdvisoryError> {
    let records = HistoryService::new(state.db.clone())
        .history_for_user(user_id)
        .await?;

    Ok(Json(records))
}
