use crate::core::track::parse_course;
use crate::models::{CourseProfileResponse, ErrorResponse};
use crate::routes::leaderboard::AppState;
use actix_web::{web, HttpResponse, Responder};
use std::path::Path;

/// Configure course profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/course/{course_id}", web::get().to(get_course_profile));
}

/// Distance/elevation profile with matched waypoints for one course
///
/// GET /api/v1/course/{course_id}
///
/// Reads {courses.dir}/{course_id}.gpx and returns the chart-ready
/// sampled points plus matched waypoints. A missing or malformed file
/// degrades to an empty profile rather than an error.
async fn get_course_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let course_id = path.into_inner();

    if !is_valid_course_id(&course_id) {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Unknown course".to_string(),
            message: format!("Invalid course id {}", course_id),
            status_code: 404,
        });
    }

    let gpx_path = Path::new(&state.settings.courses.dir).join(format!("{}.gpx", course_id));

    let source = match tokio::fs::read_to_string(&gpx_path).await {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!("Failed to read course file {:?}: {}", gpx_path, e);
            String::new()
        }
    };

    // Parsing is CPU-bound on large tracks; keep it off the reactor
    let profile = match web::block(move || parse_course(&source)).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Course parse task failed for {}: {}", course_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Course parse failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    HttpResponse::Ok().json(CourseProfileResponse {
        course_id,
        total_distance_km: profile.total_distance_km(),
        points: profile.sampled_track_points,
        waypoints: profile.waypoints,
    })
}

/// Course ids map directly to file names; restrict them so the path
/// cannot escape the courses directory
fn is_valid_course_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
