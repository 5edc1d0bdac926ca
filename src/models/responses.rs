use crate::models::domain::{CourseWaypoint, ParticipantRecord, TrackPoint};
use serde::{Deserialize, Serialize};

/// Response for the leaderboard endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub participants: Vec<ParticipantRecord>,
    pub count: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the course profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProfileResponse {
    #[serde(rename = "courseId")]
    pub course_id: String,
    pub points: Vec<TrackPoint>,
    pub waypoints: Vec<CourseWaypoint>,
    #[serde(rename = "totalDistanceKm")]
    pub total_distance_km: f64,
}

/// Response for the refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub accepted: bool,
    #[serde(rename = "categoryId")]
    pub category_id: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
