//! Domain models for resolved locations and weather reports.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used whenever the caller supplied raw coordinates
pub const COORDINATE_LOCATION_NAME: &str = "Your location";

/// A resolved geographic coordinate with a human-readable label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// A point built from caller-supplied coordinates
    pub fn from_coordinates(lat: f64, lon: f64) -> Self {
        Self::new(COORDINATE_LOCATION_NAME, lat, lon)
    }
}

/// Unit system forwarded to the weather API and echoed in the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Parse a `units` query value; anything unrecognized means metric
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("imperial") => Units::Imperial,
            _ => Units::Metric,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions at the resolved point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct CurrentConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    /// Title-cased condition text (e.g. "Scattered Clouds")
    pub description: String,
    /// OpenWeather icon code (e.g. "03d")
    pub icon: String,
}

/// Summary of one local calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct DailyForecast {
    /// ISO 8601 date local to the queried point (e.g. "2024-06-01")
    pub date: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon: String,
}

/// Response model for the weather endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct WeatherReport {
    pub location_name: String,
    pub units: Units,
    pub current: CurrentConditions,
    /// At most five days, ascending by date
    pub forecast: Vec<DailyForecast>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_parsing() {
        assert_eq!(Units::parse_or_default(None), Units::Metric);
        assert_eq!(Units::parse_or_default(Some("imperial")), Units::Imperial);
        assert_eq!(Units::parse_or_default(Some(" Imperial ")), Units::Imperial);
        assert_eq!(Units::parse_or_default(Some("kelvin")), Units::Metric);
    }

    #[test]
    fn test_units_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Units::Imperial).unwrap(), "\"imperial\"");
        assert_eq!(Units::Metric.to_string(), "metric");
    }

    #[test]
    fn test_coordinate_point_label() {
        let point = Point::from_coordinates(28.6, 77.2);
        assert_eq!(point.name, "Your location");
        assert_eq!((point.lat, point.lon), (28.6, 77.2));
    }
}
