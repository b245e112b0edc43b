use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::dashboard::DashboardError;
use crate::data::TableError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Dashboard(e @ DashboardError::InvalidSensor(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::Dashboard(e) => {
                tracing::error!("Dashboard error: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            Self::Table(e) => {
                tracing::error!("Table error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Data table error".to_string(),
                )
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
