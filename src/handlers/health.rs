//! Health and version endpoint handlers.

use crate::{
    build_info,
    models::{HealthResponse, VersionResponse},
};
use actix_web::{web, Error, Result};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Reports liveness only; upstream APIs are not contacted.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the current health status of the API in JSON format.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health() -> Result<web::Json<HealthResponse>, Error> {
    Ok(web::Json(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version information endpoint
#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the current API version, commit hash, and build time.",
    tags("Version"),
    responses(
        (status = 200, description = "Successful response", body = VersionResponse)
    )
)]
pub async fn version() -> Result<web::Json<VersionResponse>, Error> {
    Ok(web::Json(VersionResponse {
        version: build_info::VERSION.to_string(),
        commit: build_info::GIT_SHA.to_string(),
        build_time: build_info::BUILD_TIMESTAMP.to_string(),
    }))
}
