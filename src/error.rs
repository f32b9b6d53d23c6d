use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directions API error: {0}")]
    DirectionsApi(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),

    /// A walking leg of the loop could not be fetched. `leg` is 1-based.
    #[error("Leg {leg} request failed: {source}")]
    LegRequestFailed {
        leg: usize,
        #[source]
        source: Box<AppError>,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn leg_failed(leg: usize, source: AppError) -> Self {
        AppError::LegRequestFailed {
            leg,
            source: Box::new(source),
        }
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DirectionsApi(ref e) => {
                tracing::error!("Directions API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error".to_string())
            }
            AppError::NoRouteFound(ref e) => {
                tracing::info!("No route found: {}", e);
                (StatusCode::NOT_FOUND, e.clone())
            }
            AppError::LegRequestFailed { leg, ref source } => {
                tracing::warn!(leg, "Leg {} request failed: {}", leg, source);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Could not find a walking route for leg {}", leg),
                )
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
