//! Dashboard entry point.
//!
//! Runs the startup step, performs the single load-time fetch, and prints
//! the view model. Any arguments are treated as hovered country names and
//! get a tooltip each.

use std::io::{self, Write};

use covid_core::{CovidClient, Dashboard};
use covid_dashboard::render::render_hover;
use covid_dashboard::{render, startup, DashboardError, UreqTransport};
use tracing::info;

fn main() -> Result<(), DashboardError> {
    let config = startup::init()?;

    let client = CovidClient::new(&config.api_base_url);
    let transport = UreqTransport::new(config.http_timeout);
    let mut dashboard = Dashboard::new(config.malformed_policy);
    dashboard.select_mode(config.display_mode);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&dashboard, &mut out)?;
    out.flush()?;

    dashboard.apply_fetch(client.fetch_dailies(&transport));
    info!(countries = dashboard.summaries().len(), "load settled");

    writeln!(out)?;
    render(&dashboard, &mut out)?;

    let hovered: Vec<String> = std::env::args().skip(1).collect();
    if !hovered.is_empty() {
        writeln!(out)?;
        for name in &hovered {
            render_hover(&dashboard, name, &mut out)?;
        }
    }
    Ok(())
}
