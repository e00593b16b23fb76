use actix_web::HttpServer;
use std::io;
use weather_lookup_api::{
    create_app, init_tracing, AppMetrics, MetricsConfig, ServerConfig, TelemetryConfig,
    WeatherApiConfig, WeatherService,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_tracing(&telemetry).map_err(io::Error::other)?;

    let server_config = ServerConfig::from_env();
    let metrics_config = MetricsConfig::from_env();
    let metrics = AppMetrics::new().map_err(io::Error::other)?;
    let service = WeatherService::new(WeatherApiConfig::from_env(), Some(metrics.clone()))
        .map_err(io::Error::other)?;

    if service.config().api_key().is_none() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; /api/weather will return 500");
    }

    let bind_address = server_config.bind_address();
    tracing::info!(address = %bind_address, "Server starting");

    HttpServer::new(move || create_app(service.clone(), metrics.clone(), metrics_config.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
