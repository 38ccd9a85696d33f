use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, put},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/counters",
            get(handlers::list_counters).post(handlers::create_counter),
        )
        .route(
            "/api/counters/:id",
            put(handlers::update_counter).delete(handlers::delete_counter),
        )
        .route("/api/counters/:id/history", get(handlers::counter_history))
        .route("/api/history", get(handlers::global_history))
        .layer(cors)
        .with_state(state)
}
