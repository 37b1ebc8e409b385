pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::pipeline::handlers as pipeline;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Master Profile: source materials
        .route("/api/v1/profile/sources", post(profile::handle_create_source))
        .route("/api/v1/profile/sources", get(profile::handle_list_sources))
        .route(
            "/api/v1/profile/sources/upload",
            post(profile::handle_upload_source),
        )
        .route(
            "/api/v1/profile/sources/:id/extract",
            post(profile::handle_extract_source),
        )
        // Master Profile: achievements
        .route(
            "/api/v1/profile/achievements",
            get(profile::handle_list_achievements),
        )
        .route(
            "/api/v1/profile/achievements",
            post(profile::handle_create_achievement),
        )
        .route(
            "/api/v1/profile/achievements/import",
            post(profile::handle_import_achievements),
        )
        .route(
            "/api/v1/profile/achievements/:id",
            patch(profile::handle_update_achievement),
        )
        // Job opportunities and matching
        .route("/api/v1/jobs", post(jobs::handle_create_job))
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/scout", post(jobs::handle_scout))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route("/api/v1/jobs/:id/match", post(jobs::handle_match))
        // Applications and the agent pipeline
        .route(
            "/api/v1/applications",
            post(jobs::handle_create_application),
        )
        .route("/api/v1/applications", get(jobs::handle_list_applications))
        .route(
            "/api/v1/applications/:id/status",
            patch(jobs::handle_change_status),
        )
        .route(
            "/api/v1/applications/:id/qualify",
            post(pipeline::handle_qualify),
        )
        .route("/api/v1/applications/:id/hunt", post(pipeline::handle_hunt))
        .route(
            "/api/v1/applications/:id/tailor",
            post(pipeline::handle_tailor),
        )
        .route(
            "/api/v1/applications/:id/scribe",
            post(pipeline::handle_scribe),
        )
        .route(
            "/api/v1/applications/:id/assemble",
            post(pipeline::handle_assemble),
        )
        .with_state(state)
}
