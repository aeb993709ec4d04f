use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::cache::credential::Credential;
use crate::config::settings::ServiceConfig;
use crate::error::AuthError;
use crate::helpers::time::now_i64;
use crate::upstream::body_snippet;

/// Client-credentials exchange against the platform token endpoint.
#[derive(Debug, Clone)]
pub struct OAuth2Exchange {
    token_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl OAuth2Exchange {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            token_url: config.token_url.clone(),
            client_id: config.api_key.clone(),
            client_secret: config.api_secret.clone(),
        }
    }

    /// POST the client-credentials form and turn the response into a bearer
    /// credential carrying its raw expiry timestamp.
    pub async fn exchange(&self, client: &Client) -> Result<Credential, AuthError> {
        let token_url = self
            .token_url
            .as_deref()
            .ok_or(AuthError::MissingConfig("TOKEN_URL"))?;
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(AuthError::MissingConfig("API_KEY"))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or(AuthError::MissingConfig("API_SECRET"))?;

        let mut form = HashMap::new();
        form.insert("grant_type", "client_credentials");
        form.insert("client_id", client_id);
        form.insert("client_secret", client_secret);

        let response = client
            .post(token_url)
            .form(&form)
            .send()
            .await
            .map_err(AuthError::Connection)?;

        let status = response.status();
        let body = response.text().await.map_err(AuthError::Connection)?;
        if !status.is_success() {
            return Err(AuthError::UpstreamRejected {
                status: status.as_u16(),
                message: body_snippet(&body),
            });
        }

        // An unparseable body and a parseable body missing the expected
        // fields are reported as different failures.
        let parsed: serde_json::Value =
            serde_json::from_str(&body).map_err(AuthError::MalformedResponse)?;
        let token: TokenResponse =
            serde_json::from_value(parsed).map_err(|_| AuthError::UpstreamRejected {
                status: status.as_u16(),
                message: "token response is missing access_token or expires_in".to_owned(),
            })?;

        info!(expires_in = token.expires_in, "obtained bearer credential");
        Ok(Credential::new(
            format!("Bearer {}", token.access_token),
            Some(now_i64() + token.expires_in),
        ))
    }
}
