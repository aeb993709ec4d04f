use serde::{Serialize, Serializer};

use crate::utils::constants::UNAVAILABLE_MARKER;

/// A point balance that keeps "could not be determined" distinct from a
/// legitimate zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointBalance {
    Points(i64),
    Unavailable,
}

impl Serialize for PointBalance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PointBalance::Points(points) => serializer.serialize_i64(*points),
            PointBalance::Unavailable => serializer.serialize_str(UNAVAILABLE_MARKER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub display_name: String,
    pub points: PointBalance,
}

/// Aggregated roster in target-member declaration order.
///
/// Invariant: `entries` holds exactly one element per roster member,
/// whatever the upstream returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterResult {
    pub success: bool,
    pub entries: Vec<RosterEntry>,
}
