//! REST client for the ground station.
//!
//! Every call is fire-once: failures are returned to the caller, which logs
//! them and leaves the dashboard state untouched. Nothing here retries.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::engine::frame_view::PreviewSource;
use crate::engine::normalizer::normalize_all;
use crate::error::{GcsError, GcsResult, NetworkError};
use crate::models::{DetectionEvent, DisplayCommand, DisplayMode, ImageInfo, SensorSample, ThroughputStats};
use crate::traits::{Headers, HttpClient, Response};

/// Well-known path of the most recent camera frame.
pub const LIVE_IMAGE_PATH: &str = "/static/targets/latest.jpg";

const API_KEY_HEADER: &str = "x-api-key";

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Client for the ground station REST endpoints.
///
/// Generic over [`HttpClient`] so tests can drive it with the mock adapter.
#[derive(Debug, Clone)]
pub struct StationClient<H: HttpClient> {
    http: H,
    base_url: String,
    api_key: Option<String>,
}

impl<H: HttpClient> StationClient<H> {
    pub fn new(http: H, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Set the key sent with device control requests.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> GcsResult<HealthStatus> {
        let response = self.get("/health").await?;
        decode(&response, "/health")
    }

    /// `GET /api/latest-sensor`; the station answers `null` when empty.
    pub async fn latest_sensor(&self) -> GcsResult<Option<SensorSample>> {
        let value = self.get_json("/api/latest-sensor").await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(SensorSample::from_value(&value)))
    }

    /// `GET /api/sensor-history?limit=N`, oldest first.
    pub async fn sensor_history(&self, limit: usize) -> GcsResult<Vec<SensorSample>> {
        let value = self
            .get_json(&format!("/api/sensor-history?limit={}", limit))
            .await?;
        Ok(value
            .as_array()
            .map(|records| records.iter().map(SensorSample::from_value).collect())
            .unwrap_or_default())
    }

    /// `GET /api/recent-detections?limit=N`, oldest first.
    pub async fn recent_detections(&self, limit: usize) -> GcsResult<Vec<DetectionEvent>> {
        let value = self
            .get_json(&format!("/api/recent-detections?limit={}", limit))
            .await?;
        Ok(normalize_all(&value))
    }

    /// `GET /api/recent-targets`, reordered oldest first.
    pub async fn recent_targets(&self) -> GcsResult<Vec<DetectionEvent>> {
        let value = self.get_json("/api/recent-targets").await?;
        let mut events = normalize_all(&value);
        events.reverse();
        Ok(events)
    }

    /// `GET /api/telemetry/throughput`
    pub async fn throughput(&self) -> GcsResult<ThroughputStats> {
        let value = self.get_json("/api/telemetry/throughput").await?;
        Ok(ThroughputStats::from_value(&value))
    }

    /// `POST /api/clear-history`
    pub async fn clear_history(&self) -> GcsResult<()> {
        let url = self.url("/api/clear-history");
        let response = self
            .http
            .post(&url, "{}", &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        ensure_success(&response)?;
        Ok(())
    }

    /// `POST /api/device/{id}/display`
    pub async fn set_display_mode(&self, device_id: &str, mode: DisplayMode) -> GcsResult<()> {
        let device_id = device_id.trim();
        if device_id.is_empty() {
            return Err(GcsError::User("Please enter a device ID".to_string()));
        }

        let url = self.url(&format!(
            "/api/device/{}/display",
            urlencoding::encode(device_id)
        ));
        let body = serde_json::to_string(&DisplayCommand { mode }).map_err(|e| GcsError::Decode {
            endpoint: url.clone(),
            message: e.to_string(),
        })?;

        let mut headers = Headers::new();
        if let Some(key) = &self.api_key {
            headers.insert(API_KEY_HEADER.to_string(), key.clone());
        }

        let response = self
            .http
            .post(&url, &body, &headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        ensure_success(&response)?;
        Ok(())
    }

    /// Fetch and decode a preview image.
    ///
    /// Every request carries a fresh query parameter so caches never serve
    /// a stale frame from the stable path.
    pub async fn fetch_image(&self, source: &PreviewSource) -> GcsResult<ImageInfo> {
        let url = self.image_url(source);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        ensure_success(&response)?;

        ImageInfo::decode(&response.body).map_err(|e| GcsError::Decode {
            endpoint: url,
            message: e.to_string(),
        })
    }

    /// Cache-busted URL for the preview source.
    pub fn image_url(&self, source: &PreviewSource) -> String {
        let millis = Utc::now().timestamp_millis();
        match source {
            PreviewSource::Live => format!("{}?bust={}", self.url(LIVE_IMAGE_PATH), millis),
            PreviewSource::Detection(image) => {
                let base = if image.starts_with("http://") || image.starts_with("https://") {
                    image.clone()
                } else {
                    self.url(image)
                };
                let separator = if base.contains('?') { '&' } else { '?' };
                format!("{}{}v={}", base, separator, millis)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get(&self, path: &str) -> GcsResult<Response> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        ensure_success(&response)?;
        Ok(response)
    }

    async fn get_json(&self, path: &str) -> GcsResult<Value> {
        let response = self.get(path).await?;
        decode(&response, path)
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: &Response, endpoint: &str) -> GcsResult<T> {
    response.json().map_err(|e| GcsError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Turn a non-2xx response into [`GcsError::Api`] carrying the server's
/// `error` (or `message`) field.
fn ensure_success(response: &Response) -> GcsResult<()> {
    if response.is_success() {
        return Ok(());
    }

    let message = response
        .json::<Value>()
        .ok()
        .and_then(|body| {
            body.get("error")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unknown error".to_string());

    Err(GcsError::Api {
        status: response.status,
        message,
    })
}
