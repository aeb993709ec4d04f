use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::settings::ServiceConfig;

/// One member this service reports on. The roster is loaded once at startup
/// and never changes while the process runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMember {
    pub display_name: String,
    /// Identifier of the member record on the membership platform.
    pub uid: String,
}

/// Placeholder roster used when `TARGET_MEMBERS` is not provided.
pub const DEFAULT_ROSTER: &[(&str, &str)] = &[
    ("First Member", "member-001"),
    ("Second Member", "member-002"),
    ("Third Member", "member-003"),
    ("Fourth Member", "member-004"),
];

/// Resolve the target roster from config, falling back to the compiled-in
/// default.
pub fn load_roster(config: &ServiceConfig) -> Result<Vec<TargetMember>> {
    match &config.target_members {
        Some(raw) => {
            let roster: Vec<TargetMember> =
                serde_json::from_str(raw).context("TARGET_MEMBERS is not a valid JSON roster")?;
            if roster.is_empty() {
                bail!("TARGET_MEMBERS must name at least one member");
            }
            Ok(roster)
        }
        None => Ok(DEFAULT_ROSTER
            .iter()
            .map(|(display_name, uid)| TargetMember {
                display_name: (*display_name).to_owned(),
                uid: (*uid).to_owned(),
            })
            .collect()),
    }
}
