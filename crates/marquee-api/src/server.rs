//! API server implementation.
//!
//! Provides health, ready, and movie catalog endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use marquee_core::store::MovieStore;
use marquee_core::{Error, Result};

use crate::config::{Config, CorsConfig};
use crate::cors::{origin_guard, OriginPolicy};
use crate::routes;

// ============================================================================
// Health and Ready Responses
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ReadyResponse {
    /// Service readiness status.
    pub ready: bool,
    /// Number of catalog records currently held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<usize>,
    /// Optional message about readiness state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// The movie catalog.
    pub store: Arc<MovieStore>,
}

impl AppState {
    /// Creates new application state around an existing store.
    #[must_use]
    pub fn new(config: Config, store: Arc<MovieStore>) -> Self {
        Self { config, store }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Health check endpoint handler.
///
/// Returns 200 OK if the service is alive. This is a shallow check
/// that doesn't verify anything beyond the process being up.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness check endpoint handler.
///
/// Returns 200 OK when the catalog store is reachable, along with the
/// current record count.
async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.len() {
        Ok(count) => (
            StatusCode::OK,
            Json(ReadyResponse {
                ready: true,
                movies: Some(count),
                message: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                ready: false,
                movies: None,
                message: Some(format!("store unavailable: {e}")),
            }),
        ),
    }
}

// ============================================================================
// Server
// ============================================================================

/// The Marquee API server.
pub struct Server {
    config: Config,
    store: Arc<MovieStore>,
}

impl Server {
    /// Creates a new server, seeding the catalog from the configured seed
    /// path or the embedded default catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed document cannot be read or parsed.
    pub fn new(config: Config) -> Result<Self> {
        let store = match config.seed_path.as_deref() {
            Some(path) => {
                let seed = std::fs::read_to_string(path).map_err(|e| {
                    Error::InvalidInput(format!("failed to read seed catalog {path}: {e}"))
                })?;
                MovieStore::from_seed_json(&seed)?
            }
            None => MovieStore::with_default_seed()?,
        };

        tracing::info!(
            movies = store.len()?,
            seed = config.seed_path.as_deref().unwrap_or("embedded"),
            "seed catalog loaded"
        );

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    /// Creates a new server around an explicit store.
    #[must_use]
    pub fn with_store(config: Config, store: Arc<MovieStore>) -> Self {
        Self { config, store }
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the router with all routes and middleware.
    fn create_router(&self) -> Router {
        let state = Arc::new(AppState::new(self.config.clone(), Arc::clone(&self.store)));
        let policy = Arc::new(OriginPolicy::from_config(&self.config.cors));
        let cors = self.build_cors_layer();

        Router::new()
            .route("/health", get(health))
            .route("/ready", get(ready))
            .route("/openapi.json", get(crate::openapi::get_openapi_json))
            .merge(routes::movie_routes())
            // Middleware (order matters): trace outermost, then CORS headers,
            // then the origin guard so preflight never hits the guard.
            .layer(middleware::from_fn_with_state(policy, origin_guard))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Builds the CORS layer from configuration.
    fn build_cors_layer(&self) -> CorsLayer {
        let cors_config = &self.config.cors;
        let cors = Self::build_cors_base(cors_config);
        Self::apply_cors_allowed_origins(cors, cors_config)
    }

    fn build_cors_base(cors_config: &CorsConfig) -> CorsLayer {
        CorsLayer::new()
            // Exactly the methods the API serves, plus preflight
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(cors_config.max_age_seconds))
    }

    fn cors_allows_any_origin(cors_config: &CorsConfig) -> bool {
        cors_config.allowed_origins.len() == 1
            && cors_config
                .allowed_origins
                .first()
                .is_some_and(|origin| origin == "*")
    }

    fn parse_cors_origins(cors_config: &CorsConfig) -> Vec<HeaderValue> {
        let mut allowed = Vec::new();
        for origin in &cors_config.allowed_origins {
            match HeaderValue::from_str(origin) {
                Ok(value) => allowed.push(value),
                Err(_) => {
                    tracing::error!(
                        origin = %origin,
                        "Invalid CORS origin; expected a valid HeaderValue"
                    );
                }
            }
        }
        allowed
    }

    fn apply_cors_allowed_origins(cors: CorsLayer, cors_config: &CorsConfig) -> CorsLayer {
        if cors_config.allowed_origins.is_empty() {
            return cors;
        }

        if Self::cors_allows_any_origin(cors_config) {
            return cors.allow_origin(Any);
        }

        if cors_config
            .allowed_origins
            .iter()
            .any(|origin| origin == "*")
        {
            tracing::error!(
                origins = ?cors_config.allowed_origins,
                "Invalid CORS config: '*' must be the only allowed origin"
            );
            return cors;
        }

        let allowed = Self::parse_cors_origins(cors_config);

        if allowed.is_empty() {
            tracing::warn!("All configured CORS origins were invalid; disabling CORS");
            cors
        } else {
            tracing::info!(origins = ?cors_config.allowed_origins, "CORS configured");
            cors.allow_origin(AllowOrigin::list(allowed))
        }
    }

    /// Starts the server and blocks until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind to the configured port.
    pub async fn serve(&self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let router = self.create_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Internal {
                message: format!("failed to bind to {addr}: {e}"),
            })?;

        tracing::info!(
            http_port = self.config.http_port,
            "movie catalog listening on http://localhost:{}",
            self.config.http_port
        );

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal {
                message: format!("server error: {e}"),
            })?;

        Ok(())
    }

    /// Creates an in-process router for tests.
    ///
    /// Useful for integration tests that drive the full middleware stack
    /// without binding a socket.
    #[must_use]
    pub fn test_router(&self) -> Router {
        self.create_router()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_server() -> Server {
        let config = Config {
            debug: true,
            ..Config::default()
        };
        Server::new(config).expect("embedded seed")
    }

    #[test]
    fn test_router_creation() {
        let _router = test_server().test_router();
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_server()
            .test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ready_reports_seeded_count() {
        let response = test_server()
            .test_router()
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let ready: ReadyResponse = serde_json::from_slice(&bytes).expect("json");
        assert!(ready.ready);
        assert!(ready.movies.is_some_and(|count| count > 0));
    }
}
