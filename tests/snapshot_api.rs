//! End-to-end tests: router → aggregator → NWS client → mock weather service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use snapshot_server::config::WeatherConfig;
use snapshot_server::quotes::QuoteRotator;
use snapshot_server::server::build_router;
use snapshot_server::snapshot::SnapshotAggregator;
use snapshot_server::types::{Coordinate, SnapshotResponse, TimePhase};
use snapshot_server::weather::nws::NwsClient;
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOURLY_PATH: &str = "/gridpoints/ILN/85,80/forecast/hourly";

async fn healthy_upstream() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/points/40\.0076,-83\.03$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": { "forecastHourly": format!("{}{HOURLY_PATH}", server.uri()) }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(HOURLY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": { "periods": [{
                "startTime": "2026-10-18T09:00:00-04:00",
                "temperature": 44,
                "temperatureUnit": "F",
                "windSpeed": "3 mph",
                "windDirection": "S",
                "shortForecast": "Sunny",
                "detailedForecast": "Sunny, with a high near 62."
            }]}
        })))
        .mount(&server)
        .await;

    server
}

fn aggregator(server: &MockServer) -> Arc<SnapshotAggregator> {
    let nws = NwsClient::new(&WeatherConfig {
        base_url: server.uri(),
        max_retries: 0,
        ..WeatherConfig::default()
    })
    .unwrap();
    Arc::new(SnapshotAggregator::new(
        QuoteRotator::builtin(),
        Arc::new(nws),
        Coordinate::new(40.0076, -83.03),
        snapshot_server::theme::palette(),
    ))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_snapshot_end_to_end() {
    let server = healthy_upstream().await;
    let app = build_router(aggregator(&server), "static");

    let resp = app.oneshot(get("/api/snapshot")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    let snapshot: SnapshotResponse = serde_json::from_slice(&body).unwrap();

    assert!(snapshot.unix_ms > 0);
    assert!(TimePhase::ALL.contains(&snapshot.phase));
    assert!(!snapshot.quote.is_empty());
    assert_eq!(snapshot.weather.temperature, "44 F");
    assert_eq!(snapshot.weather.wind, "3 mph S");
    assert_eq!(snapshot.weather.timestamp, "2026-10-18T09:00:00-04:00");
    assert_eq!(snapshot.theme, snapshot_server::theme::palette());
}

#[tokio::test]
async fn test_sequential_snapshots_monotonic() {
    let server = healthy_upstream().await;
    let agg = aggregator(&server);

    let mut prev = i64::MIN;
    for _ in 0..5 {
        let app = build_router(Arc::clone(&agg), "static");
        let resp = app.oneshot(get("/api/snapshot")).await.unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let ts = json["unix_ms"].as_i64().unwrap();
        assert!(ts >= prev);
        prev = ts;
    }
}

#[tokio::test]
async fn test_upstream_outage_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/points/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let app = build_router(aggregator(&server), "static");
    let resp = app.oneshot(get("/api/snapshot")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("grid"));
    assert!(json.get("quote").is_none());
}

#[tokio::test]
async fn test_ping_needs_no_upstream() {
    let server = MockServer::start().await;
    let app = build_router(aggregator(&server), "static");

    let resp = app.oneshot(get("/ping")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
