//! Structured logging setup and per-request log fields.

use crate::utils::{extract_client_ip, extract_user_agent};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logging configuration
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    pub service_name: String,
    pub environment: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            service_name: "weather-lookup-api".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        let format = match env::var("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            Ok("pretty") | Ok("text") => LogFormat::Pretty,
            _ => LogFormat::Json,
        };

        Self {
            format,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "weather-lookup-api".to_string()),
            environment: env::var("SERVICE_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }
}

/// Install the global tracing subscriber
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format {
        LogFormat::Json => builder.json().with_current_span(false).try_init()?,
        LogFormat::Pretty => builder.pretty().try_init()?,
    }

    info!(
        service_name = %config.service_name,
        service_version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Tracing initialized"
    );

    Ok(())
}

/// Request attributes attached to request log lines
pub struct RequestFields {
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub method: String,
    pub path: String,
}

impl RequestFields {
    pub fn from_request(req: &actix_web::HttpRequest) -> Self {
        Self {
            user_agent: extract_user_agent(req),
            ip_address: extract_client_ip(req),
            method: req.method().to_string(),
            path: req.path().to_string(),
        }
    }
}
