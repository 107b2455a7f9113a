use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// Flat error taxonomy for the booking core. Callers branch on the kind;
/// there is no subtype hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or past-dated search input. Caller error, not retryable
    /// without fixing the request.
    #[error("{0}")]
    InvalidSearchParameters(String),

    /// Malformed booking candidate (missing email, bad seat grammar, unpaid).
    #[error("{0}")]
    InvalidBookingData(String),

    /// The requested seat is already held by another booking, or the caller
    /// lost a reservation race. Retryable with a different seat.
    #[error("{0}")]
    SeatNotAvailable(String),

    /// Referenced flight does not exist in the catalog.
    #[error("Flight not found: {0}")]
    FlightNotFound(i32),

    /// Underlying store unreachable or the transaction failed. Safe to retry
    /// the whole operation; mutations are atomic.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidSearchParameters(_) | AppError::InvalidBookingData(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::SeatNotAvailable(_) => StatusCode::CONFLICT,
            AppError::FlightNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
