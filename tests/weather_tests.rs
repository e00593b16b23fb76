//! Weather endpoint integration tests.
//!
//! The full app runs against a wiremock server standing in for both the
//! geocoding and weather APIs.

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use weather_lookup_api::{
    create_app, AppMetrics, MetricsConfig, WeatherApiConfig, WeatherService,
    LOCATION_NOT_FOUND_MESSAGE,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2024-06-01T00:00:00Z
const JUNE_1: i64 = 1_717_200_000;

fn config_for(server: &MockServer) -> WeatherApiConfig {
    WeatherApiConfig {
        weather_base_url: format!("{}/data/2.5", server.uri()),
        geo_base_url: format!("{}/geo/1.0", server.uri()),
        ..Default::default()
    }
}

async fn get_json(config: WeatherApiConfig, uri: &str) -> (StatusCode, Value) {
    let metrics = AppMetrics::new().unwrap();
    let service = WeatherService::new(config, Some(metrics.clone())).unwrap();
    let app = test::init_service(create_app(service, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).expect("response should be JSON");
    (status, json)
}

fn current_body() -> Value {
    json!({
        "coord": {"lon": 77.2, "lat": 28.6},
        "weather": [{"id": 721, "main": "Haze", "description": "haze", "icon": "50d"}],
        "main": {"temp": 33.07, "feels_like": 36.44, "temp_min": 33.07, "temp_max": 33.07, "pressure": 1002, "humidity": 52},
        "wind": {"speed": 2.57, "deg": 270},
        "dt": JUNE_1,
        "timezone": 19800,
        "name": "New Delhi"
    })
}

/// Three-hourly samples for six UTC days, IST offset
fn forecast_body() -> Value {
    let list: Vec<Value> = (0..48)
        .map(|i| {
            json!({
                "dt": JUNE_1 + i * 3 * 3600,
                "main": {"temp": 28.0 + (i % 8) as f64 * 1.25},
                "weather": [{"description": "clear sky", "icon": "01d"}]
            })
        })
        .collect();
    json!({"cod": "200", "cnt": list.len(), "list": list, "city": {"name": "New Delhi", "timezone": 19800}})
}

/// Current and forecast endpoints, matched on the resolved point
async fn mount_weather(server: &MockServer, units: &str, (lat, lon): (&str, &str)) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", lat))
        .and(query_param("lon", lon))
        .and(query_param("units", units))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", lat))
        .and(query_param("lon", lon))
        .and(query_param("units", units))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(server)
        .await;
}

async fn forbid_geocoding(server: &MockServer) {
    for endpoint in ["/geo/1.0/direct", "/geo/1.0/zip"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }
}

#[actix_web::test]
async fn test_coordinate_query_skips_geocoding() {
    let server = MockServer::start().await;
    forbid_geocoding(&server).await;
    mount_weather(&server, "metric", ("28.6", "77.2")).await;

    let (status, json) = get_json(
        config_for(&server).with_api_key("test-key"),
        "/api/weather?query=28.6,77.2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location_name"], "Your location");
    assert_eq!(json["units"], "metric");
    assert_eq!(
        json["current"],
        json!({
            "temp": 33.1,
            "feels_like": 36.4,
            "humidity": 52,
            "pressure": 1002,
            "wind_speed": 2.6,
            "description": "Haze",
            "icon": "50d"
        })
    );

    let forecast = json["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 5);
    let dates: Vec<&str> = forecast.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(
        dates,
        vec!["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"]
    );
    for day in forecast {
        assert!(day["temp_min"].as_f64().unwrap() <= day["temp_max"].as_f64().unwrap());
        assert_eq!(day["description"], "Clear Sky");
    }
}

#[actix_web::test]
async fn test_explicit_lat_lon_take_precedence() {
    let server = MockServer::start().await;
    forbid_geocoding(&server).await;
    mount_weather(&server, "imperial", ("28.6", "77.2")).await;

    let (status, json) = get_json(
        config_for(&server).with_api_key("test-key"),
        "/api/weather?query=London&lat=28.6&lon=77.2&units=imperial",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location_name"], "Your location");
    assert_eq!(json["units"], "imperial");
}

#[actix_web::test]
async fn test_unparseable_lat_lon_fall_back_to_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Pune"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Pune", "lat": 18.52, "lon": 73.85, "country": "IN", "state": "Maharashtra"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_weather(&server, "metric", ("18.52", "73.85")).await;

    let (status, json) = get_json(
        config_for(&server).with_api_key("test-key"),
        "/api/weather?query=Pune&lat=abc&lon=73.85",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location_name"], "Pune, Maharashtra, IN");
}

#[actix_web::test]
async fn test_postal_code_lookup_uses_first_matching_country() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .and(query_param("zip", "90210,IN"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .and(query_param("zip", "90210,US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "zip": "90210", "name": "Beverly Hills", "lat": 34.0901, "lon": -118.4065, "country": "US"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_weather(&server, "metric", ("34.0901", "-118.4065")).await;

    let (status, json) = get_json(
        config_for(&server).with_api_key("test-key"),
        "/api/weather?query=90210",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["location_name"], "Beverly Hills (US)");
}

#[actix_web::test]
async fn test_unknown_place_returns_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Unknownplace12345xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, json) = get_json(
        config_for(&server).with_api_key("test-key"),
        "/api/weather?query=Unknownplace12345xyz",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": LOCATION_NOT_FOUND_MESSAGE}));
}

#[actix_web::test]
async fn test_missing_query_returns_404() {
    let server = MockServer::start().await;
    forbid_geocoding(&server).await;

    let (status, json) = get_json(config_for(&server).with_api_key("test-key"), "/api/weather").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], LOCATION_NOT_FOUND_MESSAGE);
}

#[actix_web::test]
async fn test_missing_api_key_returns_500_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for uri in [
        "/api/weather?query=London",
        "/api/weather?lat=28.6&lon=77.2",
        "/api/weather",
    ] {
        let (status, json) = get_json(config_for(&server), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {uri}");
        assert_eq!(json, json!({"error": "Server is missing OPENWEATHER_API_KEY"}));
    }
}

#[actix_web::test]
async fn test_upstream_error_returns_502() {
    let server = MockServer::start().await;
    let upstream_body = r#"{"cod":401, "message": "Invalid API key."}"#;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string(upstream_body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_string(upstream_body))
        .mount(&server)
        .await;

    let (status, json) = get_json(
        config_for(&server).with_api_key("test-key"),
        "/api/weather?lat=28.6&lon=77.2",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], format!("Weather API error: 401 {upstream_body}"));
}

#[actix_web::test]
async fn test_malformed_upstream_payload_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let (status, json) = get_json(
        config_for(&server).with_api_key("test-key"),
        "/api/weather?lat=28.6&lon=77.2",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        json["error"].as_str().unwrap().starts_with("Unexpected error: "),
        "got {json}"
    );
}

#[actix_web::test]
async fn test_unreachable_upstream_returns_500() {
    // Nothing listens on port 9 (discard) in the test environment
    let config = WeatherApiConfig {
        weather_base_url: "http://127.0.0.1:9/data/2.5".to_string(),
        geo_base_url: "http://127.0.0.1:9/geo/1.0".to_string(),
        request_timeout_seconds: 2,
        ..Default::default()
    }
    .with_api_key("test-key");

    let (status, json) = get_json(config, "/api/weather?lat=1&lon=2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Unexpected error: "));
    assert!(!message.contains("test-key"), "credential leaked: {message}");
}
