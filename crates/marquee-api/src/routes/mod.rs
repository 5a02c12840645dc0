//! HTTP route handlers.

pub mod movies;

use std::sync::Arc;

use axum::Router;

use crate::server::AppState;

/// Movie catalog routes.
pub fn movie_routes() -> Router<Arc<AppState>> {
    movies::routes()
}
