use thiserror::Error;

/// Failures while obtaining or refreshing the upstream credential.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required credential configuration is absent.
    #[error("credential configuration is incomplete: {0} is not set")]
    MissingConfig(&'static str),

    /// The token endpoint answered, but not with a usable credential.
    #[error("token endpoint rejected the exchange (status {status}): {message}")]
    UpstreamRejected { status: u16, message: String },

    /// The token endpoint body was not parseable JSON.
    #[error("token endpoint returned an unparseable body")]
    MalformedResponse(#[source] serde_json::Error),

    /// Transport failure reaching the token endpoint.
    #[error("token endpoint is unreachable")]
    Connection(#[source] reqwest::Error),
}

/// Failures while querying the member directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Network-level failure before a response body was obtained.
    #[error("member API request failed")]
    ConnectionFailed(#[from] reqwest::Error),

    /// Non-success HTTP status or envelope code from the member API.
    #[error("member API returned status {status}: {message}")]
    UpstreamStatus { status: i64, message: String },

    /// Response was not valid JSON or missed required fields.
    #[error("member API returned a malformed body: {0}")]
    MalformedBody(String),

    /// No credential could be obtained, so no member data is reachable.
    #[error("could not obtain an upstream credential")]
    Auth(#[from] AuthError),
}

/// Failures that abort a whole roster build.
///
/// Per-member directory errors are absorbed into degraded entries and never
/// reach this level; only a credential failure makes the entire build
/// impossible.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("roster build aborted, no valid credential: {0}")]
    AuthFailure(#[source] AuthError),
}
