//! Startup configuration and the initial data load.
//!
//! - [`config`] - [`DashboardConfig`] built from defaults, env and CLI flags
//! - [`loader`] - the one-shot REST snapshot taken when the dashboard opens

pub mod config;
pub mod loader;

pub use config::{DashboardConfig, DEFAULT_BASE_URL};
pub use loader::load_initial_state;

use crate::cli::RunOptions;

/// Resolve the effective configuration: environment first, then command
/// line flags on top.
pub fn resolve_config(options: &RunOptions) -> DashboardConfig {
    let mut config = DashboardConfig::from_env();
    if let Some(url) = &options.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(device) = &options.device_id {
        config = config.with_device_id(device.clone());
    }
    config
}
