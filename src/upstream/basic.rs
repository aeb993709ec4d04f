use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::cache::credential::Credential;
use crate::config::settings::ServiceConfig;
use crate::error::AuthError;

/// Static `Basic` credential built from the configured key/secret.
///
/// Never expires, so the credential cache computes it once and reuses it for
/// the process lifetime.
#[derive(Debug, Clone)]
pub struct BasicHeader {
    key: Option<String>,
    secret: Option<String>,
}

impl BasicHeader {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            key: config.api_key.clone(),
            secret: config.api_secret.clone(),
        }
    }

    pub fn exchange(&self) -> Result<Credential, AuthError> {
        let key = self.key.as_deref().ok_or(AuthError::MissingConfig("API_KEY"))?;
        let secret = self
            .secret
            .as_deref()
            .ok_or(AuthError::MissingConfig("API_SECRET"))?;

        let encoded = STANDARD.encode(format!("{}:{}", key, secret));
        Ok(Credential::new(format!("Basic {}", encoded), None))
    }
}
