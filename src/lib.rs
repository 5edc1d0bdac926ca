//! Raceboard - live leaderboard and course profile service
//!
//! This library contains the two derived-data pipelines used during an
//! endurance event: the leaderboard normalization/ranking pipeline fed
//! by an external timing provider, and the GPX course processor that
//! produces distance/elevation profiles with matched checkpoints.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{haversine_distance, parse_course, LeaderboardBuilder};
pub use models::{
    CheckpointDefinition, CheckpointSplit, CourseWaypoint, ParticipantRecord, RawResultRow,
    TrackPoint,
};
