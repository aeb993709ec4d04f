use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::credential::Credential;
use crate::error::AuthError;
use crate::upstream::CredentialStrategy;

/// Single-slot credential cache in front of the configured exchange strategy.
///
/// The slot is owned by the service instance, not a process-wide global. The
/// mutex guard spans the whole read-check-then-write sequence, so concurrent
/// requests that both find the slot stale still produce exactly one token
/// exchange.
#[derive(Clone)]
pub struct CredentialCache {
    strategy: CredentialStrategy,
    client: Client,
    safety_margin_seconds: i64,
    slot: Arc<Mutex<Option<Credential>>>,
}

impl CredentialCache {
    pub fn new(strategy: CredentialStrategy, client: Client, safety_margin_seconds: i64) -> Self {
        Self {
            strategy,
            client,
            safety_margin_seconds,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Return the cached credential while it is fresh, otherwise run the
    /// configured exchange and replace the slot wholesale. The credential is
    /// never mutated in place.
    pub async fn get_credential(&self) -> Result<Credential, AuthError> {
        let mut slot = self.slot.lock().await;
        if let Some(credential) = slot.as_ref() {
            if credential.is_fresh(self.safety_margin_seconds) {
                return Ok(credential.clone());
            }
        }

        debug!("credential missing or near expiry, running exchange");
        let refreshed = self.strategy.exchange(&self.client).await?;
        *slot = Some(refreshed.clone());
        Ok(refreshed)
    }
}
