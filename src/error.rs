use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::schemas::ErrorResponse;

/// Errors a market-demand request can end with
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Destination city code is required.")]
    MissingDestination,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Could not authenticate with flight data provider.")]
    ProviderAuthentication,

    #[error("No flight data found for destination {0}. This may be due to limited availability in the test API for this route.")]
    NoFlightData(String),

    #[error("Could not process the flight data.")]
    ProcessingFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingDestination | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::ProviderAuthentication => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NoFlightData(_) => StatusCode::NOT_FOUND,
            ApiError::ProcessingFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingDestination | ApiError::InvalidBody(_) => "VALIDATION_ERROR",
            ApiError::ProviderAuthentication => "PROVIDER_AUTH_FAILED",
            ApiError::NoFlightData(_) => "NO_FLIGHT_DATA",
            ApiError::ProcessingFailed => "PROCESSING_FAILED",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (self.status(), Json(body)).into_response()
    }
}
