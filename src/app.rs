use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/dashboard/:user_id", get(handlers::get_dashboard))
        .route("/api/profile/:user_id", get(handlers::get_profile))
        .route("/api/tip", get(handlers::get_tip))
        .route("/api/log-activity", post(handlers::log_activity))
        .route("/api/leaderboard/:school", get(handlers::get_leaderboard))
        .route("/api/news", get(handlers::get_news))
        .route("/api/analyze-image", post(handlers::analyze_image))
        .with_state(state)
}
