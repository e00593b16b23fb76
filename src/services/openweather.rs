//! HTTP client for the OpenWeather geocoding and weather APIs.
//!
//! Every upstream call goes through [`OpenWeatherClient::get_json`], which
//! applies the configured timeout, attaches the credential, maps non-success
//! statuses to [`WeatherError::Upstream`] and records upstream metrics. No
//! call is ever retried.

use crate::{config::WeatherApiConfig, error::WeatherError, models::Units, services::AppMetrics};
use regex::Regex;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use std::{
    sync::{Arc, LazyLock},
    time::{Duration, Instant},
};
use tracing::{debug, warn};
use url::Url;

/// One result of the direct (free-text) geocoding endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPlace {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Result of the postal-code geocoding endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PostalPlace {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Weather condition element shared by current and forecast payloads
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionPayload {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindPayload {
    pub speed: f64,
}

/// `/weather` response
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherPayload {
    pub main: CurrentMain,
    pub wind: WindPayload,
    #[serde(default)]
    pub weather: Vec<ConditionPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

/// One 3-hour sample of the forecast feed
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// UTC instant in epoch seconds
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ConditionPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastCity {
    /// Offset from UTC in seconds, east positive
    #[serde(default)]
    pub timezone: i64,
}

/// `/forecast` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: ForecastCity,
}

static APPID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(appid=)[^&\s]+").expect("valid appid pattern"));

/// Hide the credential in a URL before it is logged
pub fn redact_api_key(url: &str) -> String {
    APPID_PATTERN.replace_all(url, "${1}[REDACTED]").into_owned()
}

/// Client for the OpenWeather APIs
///
/// Cheap to clone: the reqwest connection pool and configuration are shared.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: Client,
    config: Arc<WeatherApiConfig>,
    metrics: Option<AppMetrics>,
}

impl OpenWeatherClient {
    /// Create a client with the configured per-call timeout
    pub fn new(
        config: Arc<WeatherApiConfig>,
        metrics: Option<AppMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            config,
            metrics,
        })
    }

    /// Look up a postal code within one country
    pub async fn postal_code(&self, code: &str, country: &str) -> Result<PostalPlace, WeatherError> {
        let zip = format!("{code},{country}");
        self.get_json(
            "zip",
            &self.config.geo_base_url,
            "zip",
            &[("zip", zip.as_str())],
        )
        .await
    }

    /// Free-text geocoding, best match only
    pub async fn direct(&self, query: &str) -> Result<Vec<GeoPlace>, WeatherError> {
        self.get_json(
            "direct",
            &self.config.geo_base_url,
            "direct",
            &[("q", query), ("limit", "1")],
        )
        .await
    }

    /// Current conditions at a coordinate
    pub async fn current(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<CurrentWeatherPayload, WeatherError> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.get_json(
            "weather",
            &self.config.weather_base_url,
            "weather",
            &[("lat", lat.as_str()), ("lon", lon.as_str()), ("units", units.as_str())],
        )
        .await
    }

    /// 5 day / 3 hour forecast feed at a coordinate
    pub async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<ForecastPayload, WeatherError> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.get_json(
            "forecast",
            &self.config.weather_base_url,
            "forecast",
            &[("lat", lat.as_str()), ("lon", lon.as_str()), ("units", units.as_str())],
        )
        .await
    }

    fn build_url(
        &self,
        base_url: &str,
        path: &str,
        params: &[(&str, &str)],
        api_key: &str,
    ) -> Result<Url, WeatherError> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().copied())
            .append_pair("appid", api_key);
        Ok(url)
    }

    /// Issue one GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        base_url: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let api_key = self.config.api_key().ok_or(WeatherError::MissingApiKey)?;
        let url = self.build_url(base_url, path, params, api_key)?;
        let redacted = redact_api_key(url.as_str());
        let start = Instant::now();

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    endpoint,
                    url = %redacted,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Upstream request failed"
                );
                self.record(endpoint, "transport_error", start);
                return Err(WeatherError::Transport(e.without_url()));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                self.record(endpoint, "transport_error", start);
                return Err(WeatherError::Transport(e.without_url()));
            }
        };

        if !status.is_success() {
            debug!(
                endpoint,
                url = %redacted,
                status = status.as_u16(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Upstream returned non-success status"
            );
            self.record(endpoint, &format!("status_{}", status.as_u16()), start);
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str(&body) {
            Ok(parsed) => {
                debug!(
                    endpoint,
                    url = %redacted,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Upstream request completed"
                );
                self.record(endpoint, "success", start);
                Ok(parsed)
            }
            Err(e) => {
                warn!(endpoint, url = %redacted, error = %e, "Upstream payload did not parse");
                self.record(endpoint, "malformed", start);
                Err(WeatherError::MalformedPayload(format!(
                    "invalid {endpoint} payload: {e}"
                )))
            }
        }
    }

    fn record(&self, endpoint: &str, outcome: &str, start: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.record_upstream(endpoint, outcome, start.elapsed());
        }
    }
}
