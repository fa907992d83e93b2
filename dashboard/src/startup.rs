//! One-time process startup.
//!
//! Must run once, before the first fetch. Nothing here is stored in a global;
//! the loaded configuration is handed back to the caller.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::DashboardConfig;
use crate::error::DashboardError;

/// Install structured logging and load the configuration.
pub fn init() -> Result<DashboardConfig, DashboardError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::from_env()?;
    info!(
        api_base_url = config.api_base_url,
        display_mode = %config.display_mode,
        malformed_policy = ?config.malformed_policy,
        http_timeout_secs = config.http_timeout.map(|t| t.as_secs()),
        "configuration loaded"
    );
    Ok(config)
}
