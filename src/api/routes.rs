//! API Routes
//!
//! Configures the Axum router with all items endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_item_handler, delete_item_handler, get_item_handler, health_handler,
    list_items_handler, ping_handler, search_items_handler, update_item_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// `/items/search` is a static segment, so it takes precedence over `/items/:id`.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route("/items/search", get(search_items_handler))
        .route(
            "/items/:id",
            get(get_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
