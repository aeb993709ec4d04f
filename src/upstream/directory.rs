use std::collections::HashMap;

use http::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;

use crate::cache::credential_cache::CredentialCache;
use crate::error::DirectoryError;
use crate::upstream::body_snippet;
use crate::utils::constants::UPSTREAM_OK_CODE;

/// Client for the membership platform's member directory.
///
/// Both endpoints answer with an envelope around a `data` array; the client
/// normalizes records into plain uid/points values and leaves retry decisions
/// to the caller.
#[derive(Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
    credentials: CredentialCache,
}

#[derive(Debug, Deserialize)]
struct MemberListEnvelope {
    code: i64,
    #[serde(default)]
    data: Vec<MemberRecord>,
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    uid: String,
    #[serde(default)]
    point_amount: i64,
}

#[derive(Debug, Deserialize)]
struct MemberQueryEnvelope {
    #[serde(default)]
    data: Vec<PointRecord>,
}

#[derive(Debug, Deserialize)]
struct PointRecord {
    #[serde(default)]
    point_amount: i64,
}

impl DirectoryClient {
    pub fn new(client: Client, base_url: &str, credentials: CredentialCache) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    /// Fetch the full member list, normalized into uid -> points. Later
    /// duplicate uids overwrite earlier ones.
    pub async fn fetch_all_members(&self) -> Result<HashMap<String, i64>, DirectoryError> {
        let url = format!("{}/member/members", self.base_url);
        let body = self.get_json(&url, &[]).await?;

        let envelope: MemberListEnvelope =
            serde_json::from_str(&body).map_err(|e| DirectoryError::MalformedBody(e.to_string()))?;
        if envelope.code != UPSTREAM_OK_CODE {
            return Err(DirectoryError::UpstreamStatus {
                status: envelope.code,
                message: "member list envelope reported failure".to_owned(),
            });
        }

        let mut balances = HashMap::with_capacity(envelope.data.len());
        for record in envelope.data {
            balances.insert(record.uid, record.point_amount);
        }
        Ok(balances)
    }

    /// Look up a single member. `Ok(None)` means the directory answered but
    /// holds no record for this uid; that is not a failure.
    pub async fn fetch_one_member(&self, uid: &str) -> Result<Option<i64>, DirectoryError> {
        let url = format!("{}/members", self.base_url);
        let body = self.get_json(&url, &[("uid", uid)]).await?;

        let envelope: MemberQueryEnvelope =
            serde_json::from_str(&body).map_err(|e| DirectoryError::MalformedBody(e.to_string()))?;
        Ok(envelope
            .data
            .into_iter()
            .next()
            .map(|record| record.point_amount))
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<String, DirectoryError> {
        let credential = self.credentials.get_credential().await?;

        let mut request = self
            .client
            .get(url)
            .header(AUTHORIZATION, credential.header_value.as_str())
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DirectoryError::UpstreamStatus {
                status: i64::from(status.as_u16()),
                message: body_snippet(&body),
            });
        }
        Ok(body)
    }
}
