// Route exports
pub mod course;
pub mod leaderboard;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(leaderboard::configure)
            .configure(course::configure),
    );
}
