//! Shared constants and invariants

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SAFETY_MARGIN_SECS: i64 = 60;
pub const DEFAULT_CACHE_TTL_SECS: i64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Envelope code the member list endpoint reports on success.
pub const UPSTREAM_OK_CODE: i64 = 200;

pub const MEMBER_POINTS_ROUTE: &str = "/public-specific-member-points";

/// Wire marker for a balance that could not be determined. Distinct from a
/// legitimate zero balance.
pub const UNAVAILABLE_MARKER: &str = "unavailable";
