//! Weather endpoint handler.

use crate::{
    error::WeatherError,
    models::{WeatherQuery, WeatherReport},
    services::WeatherService,
};
use actix_web::{web, Error, HttpRequest, Result, ResponseError};
use paperclip::actix::api_v2_operation;

/// Weather endpoint
///
/// Resolves the requested location and returns current conditions plus a
/// daily forecast. Explicit `lat`/`lon` take precedence over `query` when
/// both are valid coordinates; out-of-range values fall back to `query`.
#[api_v2_operation(
    summary = "Weather Report Endpoint",
    description = "Returns current conditions and up to five daily forecasts for a location. Accepts a free-form query (city, landmark, ZIP/postal code or 'lat,lon') or explicit latitude/longitude. Explicit lat/lon win over query only when both parse and are in range (lat -90..90, lon -180..180); otherwise they are ignored and query is resolved instead. Errors are returned as JSON objects with an 'error' field.",
    tags("Weather"),
    parameters(
        ("query" = Option<String>, Query, description = "City, landmark, ZIP or 'lat,lon' (e.g., Pune, 10001, 28.6,77.2)"),
        ("lat" = Option<f64>, Query, description = "Latitude, -90 to 90; ignored with lon when either is missing or out of range"),
        ("lon" = Option<f64>, Query, description = "Longitude, -180 to 180; ignored with lat when either is missing or out of range"),
        ("units" = Option<String>, Query, description = "metric (default) or imperial"),
        ("country" = Option<String>, Query, description = "Country tried first for postal codes (default IN)"),
    ),
    responses(
        (status = 200, description = "Successful response", body = WeatherReport),
        (status = 404, description = "Location not found"),
        (status = 500, description = "Missing API key or unexpected error"),
        (status = 502, description = "Weather API returned an error")
    )
)]
pub async fn weather(
    req: HttpRequest,
    query: web::Query<WeatherQuery>,
) -> Result<web::Json<WeatherReport>, Error> {
    let Some(service) = req.app_data::<web::Data<WeatherService>>() else {
        return Err(actix_web::error::ErrorServiceUnavailable(
            "Weather service not configured",
        ));
    };

    match service.report(&query).await {
        Ok(report) => {
            tracing::debug!(
                location = %report.location_name,
                days = report.forecast.len(),
                "Returning weather report"
            );
            Ok(web::Json(report))
        }
        Err(e) => {
            log_failure(&query, &e);
            Err(e.into())
        }
    }
}

fn log_failure(query: &WeatherQuery, error: &WeatherError) {
    if error.status_code().is_server_error() {
        tracing::error!(
            query = ?query.query,
            kind = error.kind(),
            error = %error,
            "Weather request failed"
        );
    } else {
        tracing::info!(query = ?query.query, kind = error.kind(), "Location not resolved");
    }
}
