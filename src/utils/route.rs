//! Route label extraction for metrics.

use actix_web::HttpRequest;

/// Routes served by this application
const KNOWN_ROUTES: [&str; 6] = [
    "/",
    "/api/weather",
    "/api/health",
    "/api/version",
    "/api/metrics",
    "/api/spec/v2",
];

/// Extract a bounded route label from the request
///
/// Unknown paths collapse into "/unknown" so arbitrary URLs cannot
/// inflate the metrics label set.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    route_label(req.path()).to_string()
}

fn route_label(path: &str) -> &str {
    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    KNOWN_ROUTES
        .iter()
        .find(|route| **route == trimmed)
        .copied()
        .unwrap_or("/unknown")
}
