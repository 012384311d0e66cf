//! HTTP error mapping.

use super::dto::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use tictactoe_core::{MoveError, RegistryError};
use tracing::warn;

/// Error returned by API handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ApiError {
    /// Unknown game id.
    #[display("Game not found")]
    NotFound,

    /// Move body missing or malformed.
    #[display("Row and column are required")]
    MissingFields,

    /// Row or column outside `0..=2`.
    #[display("Invalid position")]
    InvalidPosition,

    /// Occupied cell or finished game.
    #[display("Invalid move")]
    InvalidMove,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingFields | ApiError::InvalidPosition | ApiError::InvalidMove => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { .. } => ApiError::NotFound,
            RegistryError::Move(MoveError::OutOfBounds { .. }) => ApiError::InvalidPosition,
            RegistryError::Move(MoveError::CellOccupied { .. } | MoveError::GameAlreadyOver) => {
                ApiError::InvalidMove
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = %status, error = %self, "Request rejected");
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
