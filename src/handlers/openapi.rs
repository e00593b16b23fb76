//! OpenAPI specification generation and app factory.

use crate::{
    config::{MetricsConfig, WeatherApiConfig},
    handlers::{get_metrics, health, index, version, weather},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, WeatherService},
};
use actix_web::App;
use paperclip::actix::{web, OpenApiExt};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Weather Lookup API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Turns a free-form location query into current weather and a five-day forecast.\n\n\
                ## Location resolution\n\
                The `query` parameter is resolved in order:\n\
                1. `lat,lon` coordinates are used directly\n\
                2. Short queries containing a digit are tried as postal codes, first in the \
                `country` hint (default `IN`) and then in `US`, `GB`, `CA`, `AU`\n\
                3. Anything else is geocoded as a place name\n\
                \n\
                Explicit `lat` and `lon` parameters take precedence over `query` when both \
                parse and are in range; otherwise they are ignored and `query` is resolved.\n\
                \n\
                ## Errors\n\
                Failures return `{\"error\": \"...\"}` with status 404 (location not found), \
                502 (weather API error) or 500 (missing API key or unexpected error)."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with explicit state
///
/// `service` and `metrics` are built once by the caller and shared by every
/// worker, so all workers report into the same registry.
pub fn create_app(
    service: WeatherService,
    metrics: AppMetrics,
    metrics_config: MetricsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(service))
        .app_data(web::Data::new(metrics))
        .app_data(web::Data::new(metrics_config))
        .service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/api/weather").route(web::get().to(weather)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}

/// Creates an app configured entirely from the environment
///
/// Convenient for tests and tooling; the server binary builds its state once
/// and calls [`create_app`] instead.
pub fn create_base_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let metrics = AppMetrics::new().expect("Failed to create metrics");
    let service = WeatherService::new(WeatherApiConfig::from_env(), Some(metrics.clone()))
        .expect("Failed to create weather service");

    create_app(service, metrics, MetricsConfig::from_env())
}
