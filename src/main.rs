use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use points_agent::cache::credential_cache::CredentialCache;
use points_agent::cache::roster_cache::RosterCache;
use points_agent::config::roster::load_roster;
use points_agent::roster::aggregator::RosterAggregator;
use points_agent::server::server::{start, AppState};
use points_agent::upstream::directory::DirectoryClient;
use points_agent::upstream::CredentialStrategy;
use points_agent::utils::logging;
use points_agent::ServiceConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Read env / CLI config
    let config = ServiceConfig::parse();
    logging::init_logging(&config);
    config.validate()?;

    // 2. Load the target roster
    let roster = load_roster(&config)?;
    info!(members = roster.len(), "target roster loaded");

    // 3. Shared HTTP client, explicit timeouts
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.http_timeout_seconds))
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .build()?;

    // 4. Wire credential strategy, directory client, aggregator and caches
    let strategy = CredentialStrategy::from_config(&config);
    let credentials = CredentialCache::new(strategy, client.clone(), config.safety_margin_seconds);
    let base_url = config.member_api_base.clone().unwrap_or_default(); // present after validate()
    let directory = DirectoryClient::new(client, &base_url, credentials);
    let aggregator = RosterAggregator::new(directory, roster, config.fetch_strategy);
    let state = AppState::new(aggregator, RosterCache::new(config.cache_ttl_seconds));

    // 5. Serve until terminated
    start(&config, state).await
}
