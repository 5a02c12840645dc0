//! `OpenAPI` specification generation for `marquee-api`.

use axum::Json;
use utoipa::OpenApi;

/// `OpenAPI` documentation for the Marquee REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marquee API",
        description = "Movie catalog REST API"
    ),
    paths(
        crate::routes::movies::list_movies,
        crate::routes::movies::get_movie,
        crate::routes::movies::create_movie,
        crate::routes::movies::update_movie,
        crate::routes::movies::delete_movie,
    ),
    components(
        schemas(
            crate::error::ApiErrorBody,
            crate::error::ViolationBody,
            crate::routes::movies::MovieResponse,
        )
    ),
    tags(
        (name = "movies", description = "Movie catalog operations"),
    )
)]
pub struct ApiDoc;

/// `GET /openapi.json`.
pub async fn get_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
