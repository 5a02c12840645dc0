//! Movie catalog API routes.
//!
//! ## Routes
//!
//! - `GET    /movies` - List movies, optionally filtered by genre
//! - `GET    /movies/{id}` - Get a movie by id
//! - `POST   /movies` - Create a movie
//! - `PATCH  /movies/{id}` - Partially update a movie
//! - `DELETE /movies/{id}` - Delete a movie
//!
//! Write payloads arrive as raw JSON so the validator can report one
//! violation per field instead of a single deserialization failure.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use marquee_core::{validate_movie, validate_partial_movie, Movie, MovieId};

use crate::error::{ApiError, ApiErrorBody, ApiResult};
use crate::server::AppState;

/// Movie response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieResponse {
    /// Movie id (ULID string).
    pub id: String,
    /// Title.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Runtime in minutes.
    pub duration: u32,
    /// Rating in [0, 10].
    pub rate: f64,
    /// Poster URL.
    pub poster: String,
    /// Genre tags.
    pub genre: Vec<String>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title,
            year: movie.year,
            duration: movie.duration,
            rate: movie.rate,
            poster: movie.poster,
            genre: movie
                .genre
                .into_iter()
                .map(|genre| genre.name().to_string())
                .collect(),
        }
    }
}

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMoviesParams {
    /// Case-insensitive genre filter.
    pub genre: Option<String>,
}

/// Creates movie routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", post(create_movie).get(list_movies))
        .route(
            "/movies/:id",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
}

/// List movies, optionally filtered by genre.
///
/// GET /movies?genre=name
#[utoipa::path(
    get,
    path = "/movies",
    tag = "movies",
    params(ListMoviesParams),
    responses(
        (status = 200, description = "Movies listed in insertion order", body = [MovieResponse]),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListMoviesParams>,
) -> ApiResult<Json<Vec<MovieResponse>>> {
    tracing::debug!(genre = params.genre.as_deref(), "listing movies");

    let movies = state
        .store
        .list(params.genre.as_deref())?
        .into_iter()
        .map(MovieResponse::from)
        .collect();

    Ok(Json(movies))
}

/// Get a movie by id.
///
/// GET /movies/{id}
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(
        ("id" = String, Path, description = "Movie id"),
    ),
    responses(
        (status = 200, description = "Movie found", body = MovieResponse),
        (status = 404, description = "Movie not found", body = ApiErrorBody),
    )
)]
pub(crate) async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MovieResponse>> {
    let id = parse_movie_id(&id)?;
    let movie = state.store.get(&id)?;
    Ok(Json(MovieResponse::from(movie)))
}

/// Create a movie.
///
/// POST /movies
#[utoipa::path(
    post,
    path = "/movies",
    tag = "movies",
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 422, description = "Payload failed validation", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> ApiResult<impl IntoResponse> {
    let draft = validate_movie(&payload).map_err(|violations| {
        ApiError::unprocessable_entity("movie payload failed validation")
            .with_violations(violations)
    })?;

    let movie = state.store.insert(draft)?;
    tracing::info!(id = %movie.id, title = %movie.title, "movie created");

    Ok((StatusCode::CREATED, Json(MovieResponse::from(movie))))
}

/// Partially update a movie.
///
/// PATCH /movies/{id}
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    tag = "movies",
    params(
        ("id" = String, Path, description = "Movie id"),
    ),
    responses(
        (status = 200, description = "Movie updated", body = MovieResponse),
        (status = 400, description = "Patch failed validation", body = ApiErrorBody),
        (status = 404, description = "Movie not found", body = ApiErrorBody),
    )
)]
pub(crate) async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> ApiResult<Json<MovieResponse>> {
    let patch = validate_partial_movie(&payload).map_err(|violations| {
        ApiError::bad_request("movie patch failed validation").with_violations(violations)
    })?;

    let id = parse_movie_id(&id)?;
    let movie = state.store.update(&id, patch)?;
    tracing::info!(id = %movie.id, "movie updated");

    Ok(Json(MovieResponse::from(movie)))
}

/// Delete a movie.
///
/// DELETE /movies/{id}
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    params(
        ("id" = String, Path, description = "Movie id"),
    ),
    responses(
        (status = 200, description = "Movie deleted"),
        (status = 404, description = "Movie not found", body = ApiErrorBody),
    )
)]
pub(crate) async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_movie_id(&id)?;
    state.store.remove(&id)?;
    tracing::info!(id = %id, "movie deleted");

    Ok(StatusCode::OK)
}

/// Maps unparseable path ids to the same outcome as ids that were never
/// issued: the caller cannot tell the difference, and neither should the
/// response.
fn parse_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("movie not found: {raw}")))
}
