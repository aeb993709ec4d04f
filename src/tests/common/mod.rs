// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::Json;
use http::StatusCode;
use reqwest::Client;
use serde_json::{json, Value};

use crate::cache::credential_cache::CredentialCache;
use crate::config::roster::TargetMember;
use crate::config::settings::{AuthMode, FetchStrategy, LogFormat, ServiceConfig};
use crate::roster::aggregator::RosterAggregator;
use crate::upstream::directory::DirectoryClient;
use crate::upstream::CredentialStrategy;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Service config pointing at mock upstreams. `token_url = None` selects the
/// static Basic mode; everything else carries the production defaults.
pub fn test_config(token_url: Option<String>, member_api_base: String) -> ServiceConfig {
    let auth_mode = if token_url.is_some() {
        AuthMode::OAuth2
    } else {
        AuthMode::Basic
    };
    ServiceConfig {
        api_key: Some("key-123".into()),
        api_secret: Some("secret-456".into()),
        host: "127.0.0.1".into(),
        port: 0,
        auth_mode,
        token_url,
        member_api_base: Some(member_api_base),
        fetch_strategy: FetchStrategy::Bulk,
        cache_ttl_seconds: 300,
        safety_margin_seconds: 60,
        http_timeout_seconds: 5,
        target_members: None,
        log_level: "info".into(),
        log_format: LogFormat::Compact,
    }
}

pub fn roster_ab() -> Vec<TargetMember> {
    vec![
        TargetMember {
            display_name: "A".into(),
            uid: "u1".into(),
        },
        TargetMember {
            display_name: "B".into(),
            uid: "u2".into(),
        },
    ]
}

/// Wire credential cache + directory client from a config.
pub fn build_directory(config: &ServiceConfig) -> DirectoryClient {
    let client = build_reqwest_client();
    let strategy = CredentialStrategy::from_config(config);
    let credentials = CredentialCache::new(strategy, client.clone(), config.safety_margin_seconds);
    DirectoryClient::new(
        client,
        config.member_api_base.as_deref().unwrap_or_default(),
        credentials,
    )
}

/// Wire the full credential -> directory -> aggregator stack from a config.
pub fn build_aggregator(config: &ServiceConfig, roster: Vec<TargetMember>) -> RosterAggregator {
    RosterAggregator::new(build_directory(config), roster, config.fetch_strategy)
}

/// Token endpoint granting `tok-<n>` with the given lifetime; counts
/// exchanges through `counter`.
pub fn token_router(counter: Arc<AtomicUsize>, expires_in: i64) -> Router {
    Router::new().route(
        "/oauth/token",
        post(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({"access_token": format!("tok-{}", n), "expires_in": expires_in}))
            }
        }),
    )
}

/// Bulk member list endpoint answering with a fixed envelope.
pub fn member_list_router(body: Value, counter: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/member/members",
        get(move || {
            let counter = counter.clone();
            let body = body.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(body)
            }
        }),
    )
}

/// Per-member lookup endpoint; uids not present in `responses` answer with an
/// empty `data` array.
pub fn member_query_router(responses: HashMap<String, (StatusCode, Value)>) -> Router {
    Router::new().route(
        "/members",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let responses = responses.clone();
            async move {
                let uid = params.get("uid").cloned().unwrap_or_default();
                match responses.get(&uid) {
                    Some((status, body)) => (*status, Json(body.clone())),
                    None => (StatusCode::OK, Json(json!({"data": []}))),
                }
            }
        }),
    )
}
