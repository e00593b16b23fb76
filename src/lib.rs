//! Weather Lookup API - turn a free-form location into weather data
//!
//! An Actix Web service that composes the OpenWeather geocoding and weather
//! APIs:
//! - Location resolution from coordinates, postal codes or place names
//! - Current conditions plus a five-day forecast bucketed by local date
//! - JSON error responses with a fixed status taxonomy
//! - Prometheus metrics, request IDs and structured logging
//! - OpenAPI documentation
//!
//! ## Architecture
//!
//! - `models/` - Request/response and domain models
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request ID and metrics middleware
//! - `services/` - OpenWeather client, location resolver, forecast aggregator
//! - `config/` - Configuration structures and environment loading
//! - `utils/` - Route labels, request inspection, number/text shaping
//!
//! ## Quick Start
//!
//! ```no_run
//! use weather_lookup_api::{create_app, AppMetrics, MetricsConfig, WeatherApiConfig, WeatherService};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let metrics = AppMetrics::new().expect("metrics");
//!     let service = WeatherService::new(WeatherApiConfig::from_env(), Some(metrics.clone()))
//!         .expect("http client");
//!     let _app = create_app(service, metrics, MetricsConfig::from_env());
//!     Ok(())
//! }
//! ```

pub mod build_info;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{MetricsConfig, ServerConfig, WeatherApiConfig};
pub use error::{WeatherError, LOCATION_NOT_FOUND_MESSAGE};
pub use handlers::{
    create_app, create_base_app, create_openapi_spec, get_metrics, health, index, version, weather,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    CurrentConditions, DailyForecast, ErrorResponse, HealthResponse, Point, Units,
    VersionResponse, WeatherQuery, WeatherReport,
};
pub use services::{
    AppMetrics, ForecastAggregator, LocationResolver, OpenWeatherClient, Resolution,
    ResolutionStrategy, WeatherService,
};
pub use telemetry::{init_tracing, TelemetryConfig};
