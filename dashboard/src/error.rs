//! Error types for the dashboard host.

/// Errors that stop the host before or while it renders.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Writing the rendered view failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}
