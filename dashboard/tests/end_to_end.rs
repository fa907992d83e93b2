//! Drive the host pieces against a live mock backend.

use std::time::Duration;

use covid_core::{CallOptions, CovidClient, Dashboard, DisplayMode, HttpMethod, LoadState};
use covid_dashboard::{render, DashboardConfig, UreqTransport};
use serde_json::json;

fn spawn_backend(table: mock_server::Table) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, table).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn rendered(dashboard: &Dashboard) -> String {
    let mut buf = Vec::new();
    render(dashboard, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn load_and_render_demo_dataset() {
    let base = spawn_backend(mock_server::demo_dataset());
    let config = DashboardConfig::from_lookup(|key| match key {
        "COVID_API_BASE_URL" => Some(base.clone()),
        "COVID_HTTP_TIMEOUT_SECS" => Some("10".to_owned()),
        _ => None,
    })
    .unwrap();

    let client = CovidClient::new(&config.api_base_url);
    let transport = UreqTransport::new(config.http_timeout);
    let mut dashboard = Dashboard::new(config.malformed_policy);
    assert!(rendered(&dashboard).contains("Loading data..."));

    dashboard.apply_fetch(client.fetch_dailies(&transport));
    let out = rendered(&dashboard);
    assert!(out.contains("Tree Map (personConfirmed)"));
    assert!(out.contains("India"));
    assert!(!out.contains("Loading data..."));

    dashboard.select_mode(DisplayMode::Death);
    let out = rendered(&dashboard);
    assert!(out.contains("Tree Map (personDeath)"));
    let india = out
        .lines()
        .filter(|l| l.trim_start().starts_with("India"))
        .last()
        .unwrap();
    assert!(india.contains("150000"));
    assert!(india.ends_with("#344b70"));
}

#[test]
fn transport_sends_headers_and_bodies() {
    let base = spawn_backend(mock_server::Table::default());
    let client = CovidClient::new(&base);
    let transport = UreqTransport::new(Some(Duration::from_secs(10)));

    let created = client.call(
        &transport,
        HttpMethod::Post,
        "odata/CovidDailies",
        &CallOptions::new()
            .header("accept", "application/json")
            .json(json!({"personConfirmed": 7, "personDeath": 1, "countryName": "Kenya"})),
    );
    assert_eq!(created.data().unwrap()["id"], 1);

    let records = client.fetch_dailies(&transport).data().unwrap();
    assert_eq!(records[0].country_name().as_deref(), Some("Kenya"));
}

#[test]
fn refused_connection_renders_failure() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = CovidClient::new(&format!("http://{addr}"));

    let mut dashboard = Dashboard::default();
    dashboard.apply_fetch(client.fetch_dailies(&UreqTransport::default()));

    assert!(matches!(dashboard.state(), LoadState::Failed(_)));
    assert!(rendered(&dashboard).contains("Could not load data:"));
}
