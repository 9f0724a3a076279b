//! HTTP-level tests for the OpenWeather provider against a mock server.

use chrono::{Days, Utc};
use serde_json::json;
use skycast_core::{Location, OpenWeatherProvider, QueryError, WeatherQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body() -> serde_json::Value {
    json!({
        "name": "London",
        "dt": 1_714_558_800,
        "visibility": 10_000,
        "main": { "temp": 15.3, "feels_like": 14.1, "humidity": 72, "pressure": 1012 },
        "weather": [{ "description": "light rain", "icon": "10d" }],
        "wind": { "speed": 4.1 },
        "clouds": { "all": 75 },
        "sys": { "country": "GB" }
    })
}

fn forecast_body() -> serde_json::Value {
    // Entries at noon UTC for the next three days, so the reduction always
    // has qualifying future days regardless of when the test runs.
    let entries: Vec<_> = (1..=3)
        .map(|d| {
            let dt = (Utc::now() + Days::new(d))
                .date_naive()
                .and_hms_opt(12, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp();
            json!({
                "dt": dt,
                "main": { "temp": 18.0, "feels_like": 17.0, "humidity": 60, "pressure": 1015 },
                "weather": [{ "description": "scattered clouds", "icon": "03d" }],
                "wind": { "speed": 5.2 }
            })
        })
        .collect();

    json!({ "city": { "timezone": 0 }, "list": entries })
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("test-key".to_string(), server.uri())
}

#[tokio::test]
async fn successful_query_returns_current_and_reduced_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let (current, forecast) = provider(&server)
        .current_and_forecast(&Location::City("London".to_string()))
        .await
        .expect("query should succeed");

    assert_eq!(current.city, "London");
    assert_eq!(current.country, "GB");
    assert_eq!(current.temperature_c, 15.3);
    assert_eq!(current.humidity_pct, 72);
    assert_eq!(current.visibility_km, 10.0);
    assert_eq!(current.cloudiness_pct, 75);
    assert_eq!(current.condition, "light rain");
    assert_eq!(current.condition_code, "10d");

    assert_eq!(forecast.len(), 3);
    assert!(forecast.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn coordinate_queries_use_lat_lon_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "51.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let (current, _) = provider(&server)
        .current_and_forecast(&Location::Coordinates {
            lat: 51.5,
            lon: -0.12,
        })
        .await
        .expect("coordinate query should succeed");

    // Coordinate lookups resolve to the API-reported city name.
    assert_eq!(current.city, "London");
}

#[tokio::test]
async fn unknown_city_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404", "message": "city not found"
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .current_and_forecast(&Location::City("Nonexistentville".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::NotFound));
}

#[tokio::test]
async fn server_error_maps_to_fetch_failed_with_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server)
        .current_and_forecast(&Location::City("London".to_string()))
        .await
        .unwrap_err();

    match err {
        QueryError::FetchFailed { endpoint, .. } => assert_eq!(endpoint, "forecast"),
        other => panic!("expected FetchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let err = provider(&server)
        .current_and_forecast(&Location::City("London".to_string()))
        .await
        .unwrap_err();

    match err {
        QueryError::Parse { endpoint, .. } => assert_eq!(endpoint, "weather"),
        other => panic!("expected Parse, got {other:?}"),
    }
}
