//! Common test utilities for badge-dl integration tests

#![allow(dead_code)]

use badge_dl::{Config, Event};
use std::time::Duration;
use tokio::sync::broadcast;
use wiremock::MockServer;

/// Minimal SVG served by the mock badge service
pub const TEST_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="90" height="20"><text>build passing</text></svg>"#;

/// Path prefix the mock service is mounted under, mirroring img.shields.io
pub const BADGE_PREFIX: &str = "/badge";

/// Config pointing at a mock badge service with a short timeout
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.fetch.base_url = base_url_for(server);
    config.fetch.timeout = Duration::from_secs(5);
    config
}

/// Base URL of the mock badge service
pub fn base_url_for(server: &MockServer) -> String {
    format!("{}{}", server.uri(), BADGE_PREFIX)
}

/// An address nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, BADGE_PREFIX)
}

/// Drain every event already sent on `events`
pub fn drain_events(events: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

/// Files in `dir` whose names mark them as leftover temporaries
pub fn leftover_temp_files(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("read output dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.contains(".tmp."))
        .collect()
}
