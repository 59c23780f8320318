//! Shared helpers for the mock-server tests

use btsport_core::{BtSportScraper, ClientConfig, Endpoints};
use wiremock::MockServer;

/// Scraper whose endpoints all point at the mock server
pub fn scraper_for(server: &MockServer) -> BtSportScraper {
    BtSportScraper::with_config(ClientConfig {
        timeout_secs: 5,
        endpoints: Endpoints::rooted_at(&server.uri()),
        ..ClientConfig::default()
    })
    .expect("client should build")
}
