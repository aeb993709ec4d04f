use crate::helpers::time::now_i64;

/// Upstream access credential, stored as a ready-to-send `Authorization`
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub header_value: String,
    /// UNIX timestamp after which the credential is invalid; `None` means
    /// non-expiring (static header mode).
    pub expires_at: Option<i64>,
}

impl Credential {
    pub fn new(header_value: String, expires_at: Option<i64>) -> Self {
        Self { header_value, expires_at }
    }

    /// Whether the credential may still be handed out. Expiring credentials
    /// are retired `safety_margin_seconds` early so an in-flight upstream
    /// call never races the actual expiry.
    pub fn is_fresh(&self, safety_margin_seconds: i64) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => now_i64() < expires_at - safety_margin_seconds,
        }
    }
}
