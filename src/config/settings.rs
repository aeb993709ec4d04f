use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use crate::utils::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT, DEFAULT_SAFETY_MARGIN_SECS,
};

/// Global service-wide settings. Everything is environment-sourced; the
/// flags exist for local runs.
#[derive(Debug, Clone, Parser)]
#[command(name = "points-agent", version, about = "Member loyalty point reporting service")]
pub struct ServiceConfig {
    /// Credential identity for the membership platform.
    #[arg(long, env = "API_KEY")]
    pub api_key: Option<String>,

    /// Credential secret for the membership platform.
    #[arg(long, env = "API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Upstream authentication scheme. Fixed per deployment, never
    /// auto-detected.
    #[arg(long, env = "AUTH_MODE", value_enum, default_value = "oauth2")]
    pub auth_mode: AuthMode,

    /// Token endpoint for the client-credentials exchange (oauth2 mode only).
    #[arg(long, env = "TOKEN_URL")]
    pub token_url: Option<String>,

    /// Base URL of the member directory API.
    #[arg(long, env = "MEMBER_API_BASE")]
    pub member_api_base: Option<String>,

    /// How roster balances are fetched: one bulk list call, or one lookup per
    /// member.
    #[arg(long, env = "FETCH_STRATEGY", value_enum, default_value = "bulk")]
    pub fetch_strategy: FetchStrategy,

    #[arg(long, env = "CACHE_TTL_SECONDS", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_seconds: i64,

    /// Seconds before credential expiry at which a refresh is forced.
    #[arg(long, env = "SAFETY_MARGIN_SECONDS", default_value_t = DEFAULT_SAFETY_MARGIN_SECS)]
    pub safety_margin_seconds: i64,

    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub http_timeout_seconds: u64,

    /// JSON array of `{"display_name", "uid"}` objects overriding the
    /// compiled-in roster.
    #[arg(long, env = "TARGET_MEMBERS")]
    pub target_members: Option<String>,

    /// Log filter directive, e.g. `info` or `points_agent=debug`.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Validate what must be known before serving. Credential key/secret are
    /// deliberately not checked here: they are only needed once a request
    /// misses the cache, and their absence is reported per-request as an
    /// `AuthError::MissingConfig`.
    pub fn validate(&self) -> Result<()> {
        if self.member_api_base.is_none() {
            bail!("MEMBER_API_BASE must be set");
        }
        if self.auth_mode == AuthMode::OAuth2 && self.token_url.is_none() {
            bail!("TOKEN_URL must be set when AUTH_MODE is oauth2");
        }
        if self.cache_ttl_seconds <= 0 {
            bail!("CACHE_TTL_SECONDS must be positive");
        }
        if self.http_timeout_seconds == 0 {
            bail!("HTTP_TIMEOUT_SECONDS must be positive, upstream calls never wait forever");
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AuthMode {
    /// Client-credentials exchange against the token endpoint.
    #[value(name = "oauth2")]
    OAuth2,
    /// Static `Basic` header computed from key/secret.
    #[value(name = "basic")]
    Basic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetchStrategy {
    #[value(name = "bulk")]
    Bulk,
    #[value(name = "per-member")]
    PerMember,
}

/// ================================
/// Logging
/// ================================
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
