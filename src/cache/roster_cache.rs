use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::AggregationError;
use crate::helpers::time::now_i64;
use crate::roster::result::RosterResult;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: RosterResult,
    expires_at: i64,
}

/// Single-slot response cache for the aggregated roster.
///
/// There is exactly one roster query shape, so this is a slot with a TTL, not
/// a keyed store. Staleness is bounded solely by the TTL; there is no
/// explicit invalidation.
#[derive(Clone)]
pub struct RosterCache {
    ttl_seconds: i64,
    slot: Arc<Mutex<Option<CacheEntry>>>,
}

impl RosterCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            ttl_seconds,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Serve the cached roster while the entry is live; otherwise run
    /// `build` and store its result. The guard is held across the build so
    /// concurrent misses issue a single upstream pass.
    ///
    /// A failed build leaves the previous entry in place untouched; only a
    /// successful aggregation may overwrite the slot.
    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<RosterResult, AggregationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RosterResult, AggregationError>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref() {
            if now_i64() < entry.expires_at {
                debug!("serving roster from cache");
                return Ok(entry.value.clone());
            }
        }

        let built = build().await?;
        if built.success {
            *slot = Some(CacheEntry {
                value: built.clone(),
                expires_at: now_i64() + self.ttl_seconds,
            });
        }
        Ok(built)
    }

    #[cfg(test)]
    pub(crate) async fn peek(&self) -> Option<RosterResult> {
        self.slot.lock().await.as_ref().map(|entry| entry.value.clone())
    }
}
