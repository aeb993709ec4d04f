use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde::Serialize;
use tracing::{error, info};

use crate::cache::roster_cache::RosterCache;
use crate::config::settings::ServiceConfig;
use crate::error::AggregationError;
use crate::roster::aggregator::RosterAggregator;
use crate::roster::result::RosterEntry;
use crate::utils::constants::MEMBER_POINTS_ROUTE;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<RosterAggregator>,
    pub cache: RosterCache,
}

impl AppState {
    pub fn new(aggregator: RosterAggregator, cache: RosterCache) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            cache,
        }
    }
}

#[derive(Serialize)]
struct PointsResponse {
    success: bool,
    data: Vec<RosterEntry>,
    message: String,
}

#[derive(Serialize)]
struct PointsErrorResponse {
    success: bool,
    error: String,
    details: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(MEMBER_POINTS_ROUTE, get(get_member_points))
        .with_state(state)
}

/// Keeps hosting webviews from seeing a 404 on the root path.
async fn index() -> &'static str {
    "points-agent is running. Query /public-specific-member-points."
}

async fn get_member_points(State(state): State<AppState>) -> Response {
    let aggregator = Arc::clone(&state.aggregator);
    let result = state
        .cache
        .get_or_build(|| async move { aggregator.build_roster().await })
        .await;

    match result {
        Ok(roster) => (
            StatusCode::OK,
            Json(PointsResponse {
                success: roster.success,
                data: roster.entries,
                message: "member points loaded successfully".to_owned(),
            }),
        )
            .into_response(),
        Err(AggregationError::AuthFailure(cause)) => {
            error!(error = %cause, "roster build failed, credential unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PointsErrorResponse {
                    success: false,
                    error: "failed to load member points".to_owned(),
                    details: cause.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Bind the configured address and serve until ctrl-c / SIGTERM.
pub async fn start(config: &ServiceConfig, state: AppState) -> Result<()> {
    let app = router(state);
    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "points-agent listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
