//! # doable-server: HTTP surface for the doable todo app
//!
//! A thin axum layer over [`doable_core::TodoService`]: JSON API, health
//! endpoint, and the embedded single-page UI. The service stays UI-agnostic;
//! the page re-fetches the list after every mutation.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use doable_core::TodoService;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::create_app;

/// State shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
}
