use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dashboard::error::DashboardError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Dashboard(DashboardError::Range(range_err)) => {
                (StatusCode::BAD_REQUEST, range_err.to_string())
            }
            AppError::Dashboard(DashboardError::NoApprovedOrders) => {
                tracing::warn!("The loaded dataset has no approved orders to derive a date range from.");
                (
                    StatusCode::NOT_FOUND,
                    DashboardError::NoApprovedOrders.to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
