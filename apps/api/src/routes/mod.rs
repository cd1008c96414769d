pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Evaluation API
        .route(
            "/api/v1/evaluations/job-posting",
            post(handlers::handle_evaluate_job_posting),
        )
        .route(
            "/api/v1/evaluations/candidate",
            post(handlers::handle_score_candidate),
        )
        // Applications
        .route(
            "/api/v1/applications/:id",
            get(handlers::handle_get_application),
        )
        .route(
            "/api/v1/applications/:id/evaluate",
            post(handlers::handle_evaluate_application),
        )
        .with_state(state)
}
