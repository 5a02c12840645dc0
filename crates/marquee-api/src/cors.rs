//! Origin allow-list enforcement.
//!
//! `tower-http`'s `CorsLayer` only controls response headers; a browser
//! enforces the result, but a disallowed cross-origin request would still
//! reach the handlers. The guard below closes that gap: requests from
//! unlisted origins are refused with a bare `403` before any route logic
//! runs. Requests without an `Origin` header (same-origin requests and
//! non-browser clients) always pass.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::CorsConfig;

/// Origin allow-list compiled from [`CorsConfig`].
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allow_any: bool,
    allowed: Vec<String>,
}

impl OriginPolicy {
    /// Compiles the policy from configuration.
    ///
    /// `["*"]` as the entire list allows every origin; a `*` mixed in with
    /// explicit origins never matches a real `Origin` header and is
    /// effectively inert.
    #[must_use]
    pub fn from_config(config: &CorsConfig) -> Self {
        let allow_any = config.allowed_origins.len() == 1
            && config
                .allowed_origins
                .first()
                .is_some_and(|origin| origin == "*");
        Self {
            allow_any,
            allowed: config.allowed_origins.clone(),
        }
    }

    /// Returns true when a request carrying this `Origin` value may proceed.
    #[must_use]
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => {
                self.allow_any || self.allowed.iter().any(|allowed| allowed == origin)
            }
        }
    }
}

/// Middleware that refuses requests from origins outside the allow-list.
///
/// An `Origin` header that is present but not readable as a string can never
/// match the allow-list and is refused as well.
pub async fn origin_guard(
    State(policy): State<Arc<OriginPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req.headers().get(header::ORIGIN).cloned();
    let allowed = match &origin {
        None => true,
        Some(value) => match value.to_str() {
            Ok(origin) => policy.is_allowed(Some(origin)),
            Err(_) => false,
        },
    };

    if allowed {
        return next.run(req).await;
    }

    tracing::warn!(
        origin = origin
            .as_ref()
            .and_then(|value| value.to_str().ok())
            .unwrap_or("<unreadable>"),
        path = req.uri().path(),
        "refusing request from disallowed origin"
    );
    StatusCode::FORBIDDEN.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(origins: &[&str]) -> OriginPolicy {
        OriginPolicy::from_config(&CorsConfig {
            allowed_origins: origins.iter().map(ToString::to_string).collect(),
            max_age_seconds: 3600,
        })
    }

    #[test]
    fn originless_requests_always_pass() {
        assert!(policy(&[]).is_allowed(None));
        assert!(policy(&["http://localhost:8080"]).is_allowed(None));
    }

    #[test]
    fn listed_origins_pass_and_others_are_refused() {
        let policy = policy(&["http://localhost:8080"]);
        assert!(policy.is_allowed(Some("http://localhost:8080")));
        assert!(!policy.is_allowed(Some("https://evil.example.com")));
    }

    #[test]
    fn lone_wildcard_allows_everything() {
        assert!(policy(&["*"]).is_allowed(Some("https://anywhere.example.com")));
    }

    #[test]
    fn wildcard_mixed_with_origins_is_inert() {
        let policy = policy(&["*", "http://localhost:8080"]);
        assert!(policy.is_allowed(Some("http://localhost:8080")));
        assert!(!policy.is_allowed(Some("https://anywhere.example.com")));
    }
}
