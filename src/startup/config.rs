//! Dashboard configuration.
//!
//! Defaults match the ground station's stock deployment; every endpoint
//! setting can be overridden from the environment or the command line.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::StorageError;
use crate::websocket::WsClientConfig;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const STATE_DIR_NAME: &str = ".gcs";

/// Configuration for the dashboard.
///
/// Use the builder pattern to customize it.
///
/// # Example
///
/// ```
/// use gcs::startup::DashboardConfig;
///
/// let config = DashboardConfig::default()
///     .with_base_url("http://10.0.0.5:5000")
///     .with_device_id("rpi-01");
/// assert_eq!(config.ws_url(), "ws://10.0.0.5:5000/stream");
/// ```
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Ground station REST base URL
    pub base_url: String,
    /// Explicit push-channel URL; derived from `base_url` when unset
    pub ws_url_override: Option<String>,
    /// Sent as `x-api-key` on device control requests
    pub api_key: Option<String>,
    /// Field device targeted by display mode commands
    pub device_id: Option<String>,
    /// Directory for persisted counters (default `~/.gcs`)
    pub state_dir: Option<PathBuf>,
    pub batch_window: Duration,
    pub ring_capacity: usize,
    pub keepalive_interval: Duration,
    pub image_poll_interval: Duration,
    pub recent_limit: usize,
    pub sensor_history_limit: usize,
    pub chart_points: usize,
    pub log_capacity: usize,
    pub reconnect_delay: Duration,
    pub max_reconnect_delay: Duration,
    pub max_reconnect_attempts: u32,
    pub connect_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ws_url_override: None,
            api_key: None,
            device_id: None,
            state_dir: None,
            batch_window: Duration::from_millis(50),
            ring_capacity: 50,
            keepalive_interval: Duration::from_secs(30),
            image_poll_interval: Duration::from_millis(3500),
            recent_limit: 40,
            sensor_history_limit: 100,
            chart_points: 100,
            log_capacity: 500,
            reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(5),
            max_reconnect_attempts: 5,
            connect_timeout: Duration::from_secs(20),
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the REST base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url_override = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    pub fn with_batch_window(mut self, window: Duration) -> Self {
        self.batch_window = window;
        self
    }

    pub fn with_ring_capacity(mut self, capacity: usize) -> Self {
        self.ring_capacity = capacity;
        self
    }

    pub fn with_max_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.max_reconnect_attempts = attempts;
        self
    }

    /// Read overrides from `GCS_BASE_URL`, `GCS_WS_URL`, `GCS_API_KEY`,
    /// `GCS_DEVICE_ID` and `GCS_STATE_DIR`. Empty values are ignored.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(url) = var("GCS_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(url) = var("GCS_WS_URL") {
            config = config.with_ws_url(url);
        }
        if let Some(key) = var("GCS_API_KEY") {
            config = config.with_api_key(key);
        }
        if let Some(device) = var("GCS_DEVICE_ID") {
            config = config.with_device_id(device);
        }
        if let Some(dir) = var("GCS_STATE_DIR") {
            config = config.with_state_dir(dir);
        }
        config
    }

    /// Push-channel URL: the override, or `base_url` with a `ws` scheme
    /// and the `/stream` path.
    pub fn ws_url(&self) -> String {
        if let Some(url) = &self.ws_url_override {
            return url.clone();
        }
        let base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            format!("ws://{}", self.base_url)
        };
        format!("{}/stream", base.trim_end_matches('/'))
    }

    /// Resolve the state directory, falling back to `~/.gcs`.
    pub fn state_dir(&self) -> Result<PathBuf, StorageError> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(STATE_DIR_NAME))
                .ok_or(StorageError::NoHomeDirectory),
        }
    }

    pub fn ws_client_config(&self) -> WsClientConfig {
        WsClientConfig {
            url: self.ws_url(),
            reconnect_delay: self.reconnect_delay,
            max_reconnect_delay: self.max_reconnect_delay,
            max_reconnect_attempts: self.max_reconnect_attempts,
            connect_timeout: self.connect_timeout,
        }
    }
}
