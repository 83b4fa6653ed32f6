// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{chat, exam, notifications, updates},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (exams, updates, notifications, chat).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let exam_routes = Router::new()
        .route("/exams", get(exam::list_exams))
        .route("/start", post(exam::start_exam))
        .route("/submit", post(exam::submit_exam))
        .route("/history", get(exam::get_history));

    let update_routes = Router::new().route(
        "/updates",
        get(updates::list_updates).post(updates::create_update),
    );

    let notification_routes = Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read-all", put(notifications::mark_all_read))
        .route("/notifications/{id}/read", put(notifications::mark_read));

    let chat_routes = Router::new().route("/chat", post(chat::chat));

    let api = Router::new()
        .merge(exam_routes)
        .merge(update_routes)
        .merge(notification_routes)
        .merge(chat_routes);

    Router::new()
        .nest("/api", api)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
