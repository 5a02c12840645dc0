//! # marquee-api
//!
//! HTTP composition layer for the Marquee movie catalog.
//!
//! This crate provides the API surface, handling:
//!
//! - **Routing**: the movie CRUD endpoints and system endpoints
//! - **CORS**: origin allow-list enforcement and preflight headers
//! - **Configuration**: environment-driven server settings
//! - **Observability**: request tracing and health checks
//!
//! ## Design Principles
//!
//! This crate is a **thin composition layer** with no domain policy.
//! What a movie is, whether a payload is valid, and how the catalog
//! mutates all live in `marquee-core`.
//!
//! ## Endpoints
//!
//! ```text
//! GET    /health        - Liveness check
//! GET    /ready         - Readiness check
//! GET    /openapi.json  - OpenAPI document
//! GET    /movies        - List movies (optional ?genre= filter)
//! GET    /movies/:id    - Fetch one movie
//! POST   /movies        - Create a movie
//! PATCH  /movies/:id    - Partially update a movie
//! DELETE /movies/:id    - Delete a movie
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use marquee_api::config::Config;
//! use marquee_api::server::Server;
//!
//! let config = Config::from_env()?;
//! Server::new(config)?.serve().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod cors;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod server;
