//! Request and response models for the HTTP surface.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request query parameters for the weather endpoint
///
/// Coordinates arrive as raw strings: a value that does not parse is ignored
/// rather than rejected, and `query` is used instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct WeatherQuery {
    /// Free-form location: city, landmark, ZIP/postal code or "lat,lon"
    pub query: Option<String>,
    /// Latitude coordinate
    pub lat: Option<String>,
    /// Longitude coordinate
    pub lon: Option<String>,
    /// "metric" (default) or "imperial"
    pub units: Option<String>,
    /// Country tried first for postal-code lookups (e.g. "IN")
    pub country: Option<String>,
}

impl WeatherQuery {
    /// Explicit coordinates, when both parse as finite floats within range
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = parse_coordinate(self.lat.as_deref())?;
        let lon = parse_coordinate(self.lon.as_deref())?;

        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some((lat, lon))
        } else {
            None
        }
    }

    /// Trimmed free-form query, empty when absent
    pub fn query_text(&self) -> &str {
        self.query.as_deref().map(str::trim).unwrap_or("")
    }

    /// Country hint override, if a non-blank one was supplied
    pub fn country_hint(&self) -> Option<String> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
    }
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
