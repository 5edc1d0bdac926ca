use crate::config::Settings;
use crate::core::LeaderboardBuilder;
use crate::models::{ErrorResponse, HealthResponse, LeaderboardResponse, RefreshResponse};
use crate::services::{FeedCache, RefreshCommand, RefreshHandle};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub cache: Arc<FeedCache>,
    pub builder: LeaderboardBuilder,
    pub refresh: RefreshHandle,
}

/// Configure leaderboard-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/leaderboard/{category_id}", web::get().to(get_leaderboard))
        .route(
            "/leaderboard/{category_id}/refresh",
            web::post().to(refresh_leaderboard),
        );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Ranked leaderboard for one category
///
/// GET /api/v1/leaderboard/{category_id}
///
/// Pulls raw rows through the TTL cache (so polling clients share one
/// upstream fetch) and rebuilds the full leaderboard. An unreachable
/// provider degrades to an empty participant list, not an error.
async fn get_leaderboard(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let category_id = path.into_inner();

    let category = match state.settings.category(&category_id) {
        Some(category) => category,
        None => {
            tracing::info!("Unknown category requested: {}", category_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Unknown category".to_string(),
                message: format!("No category configured with id {}", category_id),
                status_code: 404,
            });
        }
    };

    let rows = state.cache.get(&category.id, &category.endpoint_url).await;
    let participants = state.builder.build(&rows, &category.checkpoints);

    tracing::debug!(
        "Built leaderboard for {}: {} participants from {} rows",
        category_id,
        participants.len(),
        rows.len()
    );

    HttpResponse::Ok().json(LeaderboardResponse {
        category_id,
        count: participants.len(),
        participants,
        generated_at: chrono::Utc::now(),
    })
}

/// Enqueue a background cache repopulation for one category
///
/// POST /api/v1/leaderboard/{category_id}/refresh
///
/// Fire-and-forget: the worker refetches off the interactive path.
async fn refresh_leaderboard(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let category_id = path.into_inner();

    let category = match state.settings.category(&category_id) {
        Some(category) => category,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Unknown category".to_string(),
                message: format!("No category configured with id {}", category_id),
                status_code: 404,
            });
        }
    };

    let accepted = state.refresh.enqueue(RefreshCommand {
        category_id: category.id.clone(),
        endpoint_url: category.endpoint_url.clone(),
    });

    if accepted {
        HttpResponse::Accepted().json(RefreshResponse {
            accepted: true,
            category_id,
        })
    } else {
        HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Refresh queue full".to_string(),
            message: "Too many pending refreshes, try again shortly".to_string(),
            status_code: 503,
        })
    }
}
