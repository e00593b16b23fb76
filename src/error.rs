//! Error taxonomy for the weather endpoint and its HTTP mapping.

use crate::models::ErrorResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Message returned when no resolution strategy produced a point
pub const LOCATION_NOT_FOUND_MESSAGE: &str =
    "Location not found. Try a city name, landmark, ZIP, or 'lat,lon'.";

/// Errors that can occur while building a weather report
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Server is missing OPENWEATHER_API_KEY")]
    MissingApiKey,

    #[error("{}", LOCATION_NOT_FOUND_MESSAGE)]
    LocationNotFound,

    #[error("Weather API error: {status} {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    MalformedPayload(String),

    #[error("Unexpected error: invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl WeatherError {
    /// Short label used for logging and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::MissingApiKey => "missing_api_key",
            WeatherError::LocationNotFound => "not_found",
            WeatherError::Upstream { .. } => "upstream_status",
            WeatherError::Transport(_) => "transport",
            WeatherError::MalformedPayload(_) => "malformed_payload",
            WeatherError::InvalidUrl(_) => "invalid_url",
        }
    }
}

impl ResponseError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            WeatherError::LocationNotFound => StatusCode::NOT_FOUND,
            WeatherError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            WeatherError::MissingApiKey
            | WeatherError::Transport(_)
            | WeatherError::MalformedPayload(_)
            | WeatherError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
