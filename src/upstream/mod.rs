//! Upstream access: credential strategies and the member directory client.

use reqwest::Client;

use crate::cache::credential::Credential;
use crate::config::settings::{AuthMode, ServiceConfig};
use crate::error::AuthError;

pub mod basic;
pub mod directory;
pub mod oauth2;

use basic::BasicHeader;
use oauth2::OAuth2Exchange;

/// Authentication scheme against the membership platform. Selected once at
/// configuration time, never auto-detected.
#[derive(Debug, Clone)]
pub enum CredentialStrategy {
    OAuth2(OAuth2Exchange),
    Basic(BasicHeader),
}

impl CredentialStrategy {
    pub fn from_config(config: &ServiceConfig) -> Self {
        match config.auth_mode {
            AuthMode::OAuth2 => CredentialStrategy::OAuth2(OAuth2Exchange::new(config)),
            AuthMode::Basic => CredentialStrategy::Basic(BasicHeader::new(config)),
        }
    }

    pub async fn exchange(&self, client: &Client) -> Result<Credential, AuthError> {
        match self {
            CredentialStrategy::OAuth2(s) => s.exchange(client).await,
            CredentialStrategy::Basic(s) => s.exchange(),
        }
    }
}

/// Trim an upstream body down to something safe to put in an error message.
pub(crate) fn body_snippet(body: &str) -> String {
    const MAX_LEN: usize = 200;
    let trimmed = body.trim();
    if trimmed.len() <= MAX_LEN {
        return trimmed.to_owned();
    }
    let mut end = MAX_LEN;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
