//! JSON API handlers.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{CatalogStats, Movie, MovieDetail, MovieId, RecommendRequest, RecommendedMovie, SearchHit},
    services::recommendations::{normalize_genres, recommend as pick_recommendations},
};

use super::AppState;

/// Maximum number of search suggestions
const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Top recommendations, optionally restricted to genres
///
/// An empty body, `null`, or a body without `genres` means "no genre filter".
pub async fn recommend(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> AppResult<Json<Vec<RecommendedMovie>>> {
    let request: RecommendRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RecommendRequest::default()
    } else {
        serde_json::from_slice::<Option<RecommendRequest>>(&body)
            .map_err(|e| AppError::InvalidInput(format!("Invalid request body: {}", e)))?
            .unwrap_or_default()
    };
    let genres = normalize_genres(&request.genres);

    let catalog = state.catalog().await;
    let movies = pick_recommendations(&catalog, &state.cleaner, &genres, state.policy);

    tracing::info!(
        request_id = %request_id,
        genres = ?genres,
        returned = movies.len(),
        "Recommendations served"
    );

    Ok(Json(movies))
}

/// Every merged movie, summaries untouched
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    let catalog = state.catalog().await;
    Json(catalog.movies().to_vec())
}

/// One movie with its cleaned summary and recommendation score
pub async fn get_movie(
    State(state): State<AppState>,
    movie_id: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Json<MovieDetail>> {
    let Ok(Path(movie_id)) = movie_id else {
        return Err(AppError::NotFound("Movie not found".to_string()));
    };

    let catalog = state.catalog().await;
    catalog
        .movie_detail(movie_id, &state.cleaner)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))
}

/// Title suggestions for the search box
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<SearchHit>> {
    let catalog = state.catalog().await;
    Json(catalog.search(&params.q, SEARCH_LIMIT))
}

/// Reloads the datasets from disk
pub async fn reload_catalog(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Json<CatalogStats> {
    let stats = state.reload_catalog().await;
    tracing::info!(
        request_id = %request_id,
        movies = stats.movies,
        recommendations = stats.recommendations,
        "Catalog reloaded"
    );
    Json(stats)
}
