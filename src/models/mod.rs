// Model exports
pub mod domain;
pub mod responses;

pub use domain::{
    CheckpointDefinition, CheckpointSplit, CourseWaypoint, ParticipantRecord, RawResultRow,
    TrackPoint,
};
pub use responses::{
    CourseProfileResponse, ErrorResponse, HealthResponse, LeaderboardResponse, RefreshResponse,
};
