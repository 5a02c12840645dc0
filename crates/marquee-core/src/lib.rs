//! # marquee-core
//!
//! Core domain layer for the Marquee movie catalog service.
//!
//! This crate provides everything below the HTTP surface:
//!
//! - **Identifiers**: strongly-typed [`id::MovieId`] values
//! - **Model**: the [`movie::Movie`] record and its closed [`movie::Genre`] set
//! - **Validation**: explicit write-path validators producing normalized
//!   values or field-level violations
//! - **Store**: an injectable, insertion-ordered in-memory collection
//! - **Error Types**: shared error definitions and result types
//! - **Observability**: logging initialization helpers
//!
//! ## Crate Boundary
//!
//! `marquee-core` knows nothing about HTTP. Status codes, routing, and CORS
//! policy live in `marquee-api`; this crate only decides what a movie is,
//! whether a payload is acceptable, and how the catalog mutates.
//!
//! ## Example
//!
//! ```rust
//! use marquee_core::prelude::*;
//!
//! let store = MovieStore::new();
//! assert_eq!(store.len().unwrap(), 0);
//!
//! let id = MovieId::generate();
//! assert!(store.get(&id).is_err());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod movie;
pub mod observability;
pub mod store;
pub mod validate;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use marquee_core::prelude::*;
///
/// let id = MovieId::generate();
/// let store = MovieStore::new();
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::id::MovieId;
    pub use crate::movie::{Genre, Movie, MovieDraft, MoviePatch};
    pub use crate::store::MovieStore;
    pub use crate::validate::{validate_movie, validate_partial_movie, FieldViolation};
}

pub use error::{Error, Result};
pub use id::MovieId;
pub use movie::{Genre, Movie, MovieDraft, MoviePatch};
pub use store::MovieStore;
pub use validate::{validate_movie, validate_partial_movie, FieldViolation};
