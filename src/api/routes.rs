use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::request_id_middleware;

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Lists and ordering
        .route("/lists", post(handlers::create_list))
        .route("/lists/:list_id/items", get(handlers::get_list_items))
        .route("/lists/:list_id/order", put(handlers::reorder_list))
        // Items
        .route("/items", post(handlers::create_item))
        // Catalog search
        .route("/search", get(handlers::search))
        // Recommendations
        .route(
            "/users/:user_id/recommendations",
            get(handlers::recommendations),
        )
}
