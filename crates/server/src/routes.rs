//! Router assembly: API routes, UI page, and middleware layers.

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use doable_core::TodoService;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes and layers.
pub fn create_app(service: TodoService) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    let state = AppState { service };

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/api/todos/:id",
            get(handlers::get_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/api/todos/:id/toggle", post(handlers::toggle_todo))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
