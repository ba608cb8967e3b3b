//! StationClient over real HTTP against a wiremock server.

use gcs::adapters::ReqwestHttpClient;
use gcs::engine::PreviewSource;
use gcs::error::GcsError;
use gcs::models::{Category, DisplayMode, SensorMetric};
use gcs::station::StationClient;
use image::{ImageFormat, RgbImage};
use serde_json::json;
use std::io::Cursor;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn station(server: &MockServer) -> StationClient<ReqwestHttpClient> {
    StationClient::new(ReqwestHttpClient::new(), server.uri())
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "uav-gcs",
            "version": "2.1.0"
        })))
        .mount(&server)
        .await;

    let health = station(&server).health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.version, "2.1.0");
}

#[tokio::test]
async fn test_latest_sensor_and_empty_database() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/latest-sensor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "co_ppm": 2.5,
            "temp_c": 24.1,
            "humidity_pct": 40.0,
            "ts": "2024-05-01T12:00:00"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/latest-sensor"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let station = station(&server);
    let sample = station.latest_sensor().await.unwrap().unwrap();
    assert_eq!(sample.get(SensorMetric::Temperature), Some(24.1));

    assert!(station.latest_sensor().await.unwrap().is_none());
}

#[tokio::test]
async fn test_recent_detections_passes_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recent-detections"))
        .and(query_param("limit", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "aruco", "ts": 1_700_000_001, "details": {"id": 3}},
            {"type": "valve", "ts": 1_700_000_002}
        ])))
        .mount(&server)
        .await;

    let events = station(&server).recent_detections(40).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].category, Category::Aruco);
}

#[tokio::test]
async fn test_display_mode_sends_key_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/device/rpi-01/display"))
        .and(header("x-api-key", "secret"))
        .and(body_json(json!({"mode": "targets"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    station(&server)
        .with_api_key(Some("secret".to_string()))
        .set_display_mode(" rpi-01 ", DisplayMode::Targets)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_success_is_structured_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/device/rpi-01/display"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API key"})))
        .mount(&server)
        .await;

    let err = station(&server)
        .set_display_mode("rpi-01", DisplayMode::Ip)
        .await
        .unwrap_err();
    match err {
        GcsError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_live_image_is_cache_busted_and_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/static/targets/latest.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png(4, 3)))
        .mount(&server)
        .await;

    let station = station(&server);
    let info = station.fetch_image(&PreviewSource::Live).await.unwrap();
    assert_eq!((info.width, info.height), (4, 3));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().unwrap_or("").starts_with("bust="));
}

#[tokio::test]
async fn test_unreachable_station_is_network_error() {
    let station = StationClient::new(ReqwestHttpClient::new(), "http://127.0.0.1:1");
    let err = station.clear_history().await.unwrap_err();
    assert!(matches!(err, GcsError::Network(_)));
    assert!(err.is_retryable());
}
