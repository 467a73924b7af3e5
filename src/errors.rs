use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Error taxonomy shared by every advisory service and handler.
///
/// Handlers return this directly; the `IntoResponse` impl is the single
/// place where domain failures map to HTTP statuses.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("invalid username or password")]
    Unauthorized,

    #[error("cannot delete {entity} {id}: still referenced by {dependents}")]
    ReferentialConflict {
        entity: &'static str,
        id: String,
        dependents: &'static str,
    },

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

impl AdvisoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ReferentialConflict { .. } => StatusCode::CONFLICT,
            // Connection-level failures are transient and retryable by the
            // caller; everything else is an internal fault.
            Self::Storage(DbErr::Conn(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdvisoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn not_found_maps_to_404() {
        let err = AdvisoryError::not_found("pest", 7);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "pest 7 not found");
    }

    #[test]
    fn invalid_argument_maps_to_400() {
        let err = AdvisoryError::invalid_argument("plot_name is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn referential_conflict_maps_to_409() {
        let err = AdvisoryError::ReferentialConflict {
            entity: "active ingredient",
            id: "3".to_string(),
            dependents: "trade products",
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.to_string().contains("still referenced"));
    }

    #[test]
    fn connection_errors_are_unavailable_others_internal() {
        let conn = AdvisoryError::Storage(DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        )));
        assert_eq!(conn.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let query = AdvisoryError::Storage(DbErr::Custom("bad query".to_string()));
        assert_eq!(query.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
