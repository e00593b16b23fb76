//! Weather report assembly: resolve the location, aggregate the forecast.

use crate::{
    config::WeatherApiConfig,
    error::WeatherError,
    models::{Point, Units, WeatherQuery, WeatherReport},
    services::{
        forecast::ForecastAggregator,
        location::{LocationResolver, Resolution, ResolutionStrategy},
        openweather::OpenWeatherClient,
        AppMetrics,
    },
};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds weather reports from incoming queries
///
/// Constructed once at startup; every request runs independently against
/// the shared client and configuration.
#[derive(Clone)]
pub struct WeatherService {
    config: Arc<WeatherApiConfig>,
    resolver: LocationResolver,
    aggregator: ForecastAggregator,
    metrics: Option<AppMetrics>,
}

impl WeatherService {
    /// Create a new weather service from explicit configuration
    pub fn new(config: WeatherApiConfig, metrics: Option<AppMetrics>) -> Result<Self, reqwest::Error> {
        let config = Arc::new(config);
        let client = OpenWeatherClient::new(Arc::clone(&config), metrics.clone())?;

        let resolver = LocationResolver::new(
            client.clone(),
            config.default_country.clone(),
            config.postal_fallback_countries.clone(),
        );
        let aggregator = ForecastAggregator::new(client);

        Ok(Self {
            config,
            resolver,
            aggregator,
            metrics,
        })
    }

    pub fn config(&self) -> &WeatherApiConfig {
        &self.config
    }

    /// Resolve the query's location and build its report
    pub async fn report(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        // No upstream call is attempted without a credential
        if self.config.api_key().is_none() {
            return Err(WeatherError::MissingApiKey);
        }

        let units = Units::parse_or_default(query.units.as_deref());
        let resolution = self.locate(query).await;
        self.record_resolution(&resolution);
        let Resolution { point, strategy } = resolution?;

        info!(
            location = %point.name,
            lat = point.lat,
            lon = point.lon,
            strategy = strategy.as_str(),
            units = %units,
            "Resolved location"
        );

        let (current, forecast) = self.aggregator.aggregate(&point, units).await?;
        debug!(location = %point.name, days = forecast.len(), "Aggregated forecast");

        Ok(WeatherReport {
            location_name: point.name,
            units,
            current,
            forecast,
        })
    }

    /// Explicit `lat`/`lon` win over `query`
    async fn locate(&self, query: &WeatherQuery) -> Result<Resolution, WeatherError> {
        match query.coordinates() {
            Some((lat, lon)) => Ok(Resolution {
                point: Point::from_coordinates(lat, lon),
                strategy: ResolutionStrategy::Explicit,
            }),
            None => {
                let hint = query.country_hint();
                self.resolver
                    .resolve(query.query_text(), hint.as_deref())
                    .await
            }
        }
    }

    fn record_resolution(&self, resolution: &Result<Resolution, WeatherError>) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        match resolution {
            Ok(resolution) => metrics.record_resolution(resolution.strategy.as_str()),
            Err(WeatherError::LocationNotFound) => metrics.record_resolution("not_found"),
            Err(_) => metrics.record_resolution("error"),
        }
    }
}
