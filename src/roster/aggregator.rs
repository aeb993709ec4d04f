use std::collections::HashMap;

use tracing::warn;

use crate::config::roster::TargetMember;
use crate::config::settings::FetchStrategy;
use crate::error::{AggregationError, DirectoryError};
use crate::roster::result::{PointBalance, RosterEntry, RosterResult};
use crate::upstream::directory::DirectoryClient;

/// Maps the fixed target roster onto upstream balances.
///
/// Directory failures degrade individual entries to `Unavailable` and are
/// logged here; the one hard failure is a credential that cannot be obtained
/// at all, since then no member data is reachable.
pub struct RosterAggregator {
    directory: DirectoryClient,
    roster: Vec<TargetMember>,
    strategy: FetchStrategy,
}

impl RosterAggregator {
    pub fn new(directory: DirectoryClient, roster: Vec<TargetMember>, strategy: FetchStrategy) -> Self {
        Self {
            directory,
            roster,
            strategy,
        }
    }

    /// Build the roster result. Entry order always follows roster
    /// declaration order, independent of upstream ordering or which lookups
    /// failed.
    pub async fn build_roster(&self) -> Result<RosterResult, AggregationError> {
        let entries = match self.strategy {
            FetchStrategy::Bulk => self.build_bulk().await?,
            FetchStrategy::PerMember => self.build_per_member().await?,
        };
        Ok(RosterResult {
            success: true,
            entries,
        })
    }

    async fn build_bulk(&self) -> Result<Vec<RosterEntry>, AggregationError> {
        let balances = match self.directory.fetch_all_members().await {
            Ok(balances) => balances,
            Err(DirectoryError::Auth(e)) => return Err(AggregationError::AuthFailure(e)),
            Err(e) => {
                warn!(error = %e, "bulk member fetch failed, whole roster degraded");
                HashMap::new()
            }
        };

        Ok(self
            .roster
            .iter()
            .map(|member| RosterEntry {
                display_name: member.display_name.clone(),
                points: match balances.get(&member.uid) {
                    Some(points) => PointBalance::Points(*points),
                    None => PointBalance::Unavailable,
                },
            })
            .collect())
    }

    async fn build_per_member(&self) -> Result<Vec<RosterEntry>, AggregationError> {
        let mut entries = Vec::with_capacity(self.roster.len());
        for member in &self.roster {
            let points = match self.directory.fetch_one_member(&member.uid).await {
                Ok(Some(points)) => PointBalance::Points(points),
                Ok(None) => {
                    warn!(uid = %member.uid, "member not found upstream");
                    PointBalance::Unavailable
                }
                Err(DirectoryError::Auth(e)) => return Err(AggregationError::AuthFailure(e)),
                Err(e) => {
                    warn!(uid = %member.uid, error = %e, "member lookup failed, entry degraded");
                    PointBalance::Unavailable
                }
            };
            entries.push(RosterEntry {
                display_name: member.display_name.clone(),
                points,
            });
        }
        Ok(entries)
    }
}
