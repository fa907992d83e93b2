//! Terminal host for the COVID-19 dashboard.
//!
//! Wires the pieces `covid-core` leaves to its caller: an explicit startup
//! step (logging and configuration), a blocking `ureq` transport, and a
//! plain-text rendering of the view model.

pub mod config;
pub mod error;
pub mod render;
pub mod startup;
pub mod transport;

pub use config::DashboardConfig;
pub use error::DashboardError;
pub use render::render;
pub use transport::UreqTransport;
