use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Admin-configured checkpoint definition for one race category
///
/// Declares which upstream field keys hold this checkpoint's time and
/// rank data. Owned by the external configuration store; consumed
/// read-only when building a leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointDefinition {
    pub name: String,
    #[serde(rename = "timeFieldKey", alias = "time_field_key")]
    pub time_field_key: String,
    #[serde(rename = "segmentFieldKey", alias = "segment_field_key", default)]
    pub segment_field_key: Option<String>,
    #[serde(
        rename = "overallRankFieldKey",
        alias = "overall_rank_field_key",
        default
    )]
    pub overall_rank_field_key: Option<String>,
    #[serde(
        rename = "genderRankFieldKey",
        alias = "gender_rank_field_key",
        default
    )]
    pub gender_rank_field_key: Option<String>,
    #[serde(rename = "orderIndex", alias = "order_index", default)]
    pub order_index: i32,
}

/// One raw row from the timing provider
///
/// The upstream schema is data-driven (field keys are configured per
/// category by admins), so rows are kept as a string-keyed map and read
/// through defensive accessors instead of a fixed struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResultRow(pub HashMap<String, Value>);

impl RawResultRow {
    /// Read a field as a string, defaulting missing/null values to ""
    pub fn get_str(&self, key: &str) -> String {
        self.get_opt_str(key).unwrap_or_default()
    }

    /// Read a field as an optional string; absent, null and empty
    /// values are all None
    pub fn get_opt_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// One checkpoint's captured data for one participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointSplit {
    pub name: String,
    pub time: Option<String>,
    pub segment: Option<String>,
    #[serde(rename = "overallRank")]
    pub overall_rank: Option<i64>,
    #[serde(rename = "genderRank")]
    pub gender_rank: Option<i64>,
}

/// Cleaned, ranked participant entry
///
/// Rebuilt wholesale on every cache-refresh cycle; bib is the natural
/// key but no identity persists across cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRecord {
    #[serde(rename = "overallRank")]
    pub overall_rank: i64,
    #[serde(rename = "genderRank")]
    pub gender_rank: i64,
    pub bib: String,
    pub name: String,
    pub gender: String,
    pub nation: String,
    pub club: String,
    #[serde(rename = "finishTime")]
    pub finish_time: Option<String>,
    #[serde(rename = "netTime")]
    pub net_time: Option<String>,
    pub gap: Option<String>,
    pub status: String,
    pub checkpoints: Vec<CheckpointSplit>,
}

impl ParticipantRecord {
    /// Overall rank treated as +infinity when the raw value is <= 0,
    /// so unranked / DNF-pending entries sort after every ranked one
    pub fn effective_rank(&self) -> i64 {
        if self.overall_rank > 0 {
            self.overall_rank
        } else {
            i64::MAX
        }
    }
}

/// Full-resolution course point with cumulative distance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackPoint {
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "elevationM")]
    pub elevation_m: f64,
    pub lat: f64,
    pub lon: f64,
}

/// Named waypoint matched onto the course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseWaypoint {
    pub name: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "elevationM")]
    pub elevation_m: f64,
}
