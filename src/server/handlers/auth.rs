use axum::{extract::State, response::Json};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::database::entities::{users, users::Entity as Users};
use crate::errors::AdvisoryError;
use crate::server::app::AppState;

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
}

/// Credential check against the user table. Returns the user row without
/// the password; no session state is created.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AdvisoryError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AdvisoryError::invalid_argument(
            "username and password are required",
        ));
    }

    let user = Users::find()
        .filter(users::Column::Username.eq(payload.username))
        .filter(users::Column::Password.eq(payload.password))
        .one(&state.db)
        .await?
        .ok_or(AdvisoryError::Unauthorized)?;

    Ok(Json(LoginResponse {
        success: true,
        user: UserInfo {
            user_id: user.id,
            username: user.username,
            role: user.role,
        },
    }))
}
