//! Request inspection helpers used by the logging middleware.

use actix_web::HttpRequest;

/// Client IP address for log correlation
///
/// Prefers the first hop of `X-Forwarded-For`, then `X-Real-IP`, then the
/// peer address of the connection.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    let forwarded = ["X-Forwarded-For", "X-Real-IP"].iter().find_map(|name| {
        req.headers()
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string)
    });

    forwarded.unwrap_or_else(|| {
        req.connection_info()
            .peer_addr()
            .unwrap_or("unknown")
            .to_string()
    })
}

/// User agent of the caller, if it sent one
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = TestRequest::get()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "10.0.0.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::get()
            .insert_header(("X-Real-IP", "198.51.100.4"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "198.51.100.4");
    }

    #[test]
    fn test_user_agent() {
        let req = TestRequest::get()
            .insert_header(("User-Agent", "curl/8.0"))
            .to_http_request();
        assert_eq!(extract_user_agent(&req).as_deref(), Some("curl/8.0"));
        assert_eq!(extract_user_agent(&TestRequest::get().to_http_request()), None);
    }
}
