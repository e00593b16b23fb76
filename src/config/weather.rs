//! OpenWeather API configuration.
//!
//! Built once at startup and handed to [`crate::services::WeatherService`];
//! nothing reads these variables after that.

use std::env;

const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_GEO_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Configuration for the upstream geocoding and weather APIs
#[derive(Debug, Clone)]
pub struct WeatherApiConfig {
    /// OpenWeather credential. `None` means the server cannot serve weather.
    pub api_key: Option<String>,
    /// Base URL for the current-conditions and forecast endpoints
    pub weather_base_url: String,
    /// Base URL for the postal and direct geocoding endpoints
    pub geo_base_url: String,
    /// Country tried first for postal-code lookups
    pub default_country: String,
    /// Countries tried, in order, after the hint
    pub postal_fallback_countries: Vec<String>,
    /// Timeout applied to every upstream call (in seconds)
    pub request_timeout_seconds: u64,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
            default_country: "IN".to_string(),
            postal_fallback_countries: default_fallback_countries(),
            request_timeout_seconds: 10,
        }
    }
}

impl WeatherApiConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let weather_base_url = env::var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_WEATHER_BASE_URL.to_string());

        let geo_base_url = env::var("OPENWEATHER_GEO_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEO_BASE_URL.to_string());

        let default_country = env::var("WEATHER_DEFAULT_COUNTRY")
            .ok()
            .map(|v| v.trim().to_uppercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "IN".to_string());

        // Comma-separated list, e.g. "US,GB,CA,AU"
        let postal_fallback_countries = env::var("WEATHER_POSTAL_FALLBACK_COUNTRIES")
            .ok()
            .map(|v| parse_country_list(&v))
            .unwrap_or_else(default_fallback_countries);

        let request_timeout_seconds = env::var("WEATHER_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|seconds: &u64| *seconds > 0)
            .unwrap_or(10);

        Self {
            api_key,
            weather_base_url,
            geo_base_url,
            default_country,
            postal_fallback_countries,
            request_timeout_seconds,
        }
    }

    /// Returns a copy of this configuration with the given credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The credential, if one is configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn default_fallback_countries() -> Vec<String> {
    ["US", "GB", "CA", "AU"].iter().map(|c| c.to_string()).collect()
}

fn parse_country_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}
