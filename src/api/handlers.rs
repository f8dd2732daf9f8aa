use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::SessionId;
use crate::models::{RandomPick, RecommendationSet, SessionState};
use crate::services::{
    discovery, recommend,
    recommendations::{self, validate_count},
    title_search,
};
use crate::store::MovieData;

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_movies: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub titles: Vec<String>,
    /// Title the picker starts on
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub matches: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    /// Query title; the session's selection is used when absent
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CountRequest {
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RandomPicksResponse {
    pub picks: Vec<RandomPick>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}

// Handlers

/// Health check endpoint, reporting whether the movie data is usable
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.data.get() {
        Ok(data) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "movies": data.catalog.len() })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": e.to_string() })),
        ),
    }
}

/// Catalog statistics
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let data = state.movie_data()?;
    Ok(Json(StatsResponse {
        total_movies: data.catalog.len(),
        loaded_at: data.loaded_at,
    }))
}

/// Get all titles along with the picker's starting selection
pub async fn get_movies(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> AppResult<Json<MoviesResponse>> {
    let data = state.movie_data()?;
    let mut inner = state.inner.write().await;
    let session = inner.session(&session_id);

    Ok(Json(MoviesResponse {
        titles: data.catalog.titles().map(String::from).collect(),
        selected: title_search::default_selection(
            &data.catalog,
            session.selected_title.as_deref(),
        ),
    }))
}

/// Case-insensitive substring search over titles
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let data = state.movie_data()?;
    let matches = title_search::search_titles(&data.catalog, &params.q);

    tracing::debug!(query = %params.q, matches = matches.len(), "Title search");

    Ok(Json(SearchResponse {
        query: params.q,
        matches,
    }))
}

/// Get the session's state
pub async fn get_session(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> AppResult<Json<SessionState>> {
    state.movie_data()?;
    let mut inner = state.inner.write().await;
    Ok(Json(inner.session(&session_id)))
}

/// Set the session's selected title
pub async fn set_selection(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<SelectionRequest>,
) -> AppResult<Json<SessionState>> {
    state.movie_data()?;
    let mut inner = state.inner.write().await;
    let session = inner.session_mut(session_id);
    session.select(request.title);
    Ok(Json(session.clone()))
}

/// Recommend titles similar to the requested or selected one
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationSet>> {
    let data = state.movie_data()?;
    let request = optional_body(body)?;
    let count = validate_count(request.count.unwrap_or(state.settings.default_count))?;

    let mut inner = state.inner.write().await;
    let session = inner.session_mut(session_id);

    // A stale selection is kept as is so the lookup reports it as not found
    let query = request
        .title
        .or_else(|| session.selected_title.clone())
        .or_else(|| data.catalog.get(0).map(|movie| movie.title.clone()))
        .ok_or_else(|| AppError::InvalidInput("The movie catalog is empty".to_string()))?;

    let results = run_recommendation(&data, session, query, count, &session_id)?;
    Ok(Json(results))
}

/// Pick a random title and recommend for it
pub async fn surprise(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    body: Result<Json<CountRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationSet>> {
    let data = state.movie_data()?;
    let request = optional_body(body)?;
    let count = validate_count(request.count.unwrap_or(state.settings.default_count))?;

    let query = discovery::random_title(&data.catalog, &mut rand::thread_rng())
        .ok_or_else(|| AppError::InvalidInput("The movie catalog is empty".to_string()))?;

    let mut inner = state.inner.write().await;
    let session = inner.session_mut(session_id);
    let results = run_recommendation(&data, session, query, count, &session_id)?;
    Ok(Json(results))
}

/// Recommend again for a random title out of the last results
pub async fn more_like_this(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    body: Result<Json<CountRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationSet>> {
    let data = state.movie_data()?;
    let request = optional_body(body)?;
    let count = validate_count(request.count.unwrap_or(state.settings.default_count))?;

    let mut inner = state.inner.write().await;
    let session = inner.session_mut(session_id);

    let query = session
        .last_results
        .as_ref()
        .and_then(|results| discovery::pick_from_results(results, &mut rand::thread_rng()))
        .ok_or_else(|| AppError::InvalidInput("No recommendations to start from".to_string()))?;

    let results = run_recommendation(&data, session, query, count, &session_id)?;
    Ok(Json(results))
}

/// Share text for the last results
pub async fn share_results(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> AppResult<Json<ShareResponse>> {
    state.movie_data()?;
    let mut inner = state.inner.write().await;
    let results = inner
        .session(&session_id)
        .last_results
        .ok_or_else(|| AppError::InvalidInput("No recommendations to share".to_string()))?;

    Ok(Json(ShareResponse {
        text: recommendations::share_text(&results),
    }))
}

/// Draw random titles for discovery
pub async fn random_picks(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    body: Result<Json<CountRequest>, JsonRejection>,
) -> AppResult<Json<RandomPicksResponse>> {
    let data = state.movie_data()?;
    let request = optional_body(body)?;
    let count = request.count.unwrap_or(state.settings.random_pick_count);
    let titles = discovery::random_sample(&data.catalog, count, &mut rand::thread_rng());

    let mut inner = state.inner.write().await;
    inner.session_mut(session_id).random_picks = titles.clone();

    Ok(Json(RandomPicksResponse {
        picks: titles.into_iter().map(RandomPick::new).collect(),
    }))
}

/// Get the session's favorites
pub async fn get_favorites(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> AppResult<Json<FavoritesResponse>> {
    state.movie_data()?;
    let mut inner = state.inner.write().await;
    Ok(Json(FavoritesResponse {
        favorites: inner.session(&session_id).favorites.titles(),
    }))
}

/// Save every title of the last results as favorites
pub async fn add_favorites(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> AppResult<Json<FavoritesResponse>> {
    state.movie_data()?;
    let mut inner = state.inner.write().await;
    let session = inner.session_mut(session_id);

    let offered = session
        .save_last_results()
        .ok_or_else(|| AppError::InvalidInput("No recommendations to save".to_string()))?;

    tracing::info!(
        session_id = %session_id,
        offered,
        favorites = session.favorites.len(),
        "Saved favorites"
    );

    Ok(Json(FavoritesResponse {
        favorites: session.favorites.titles(),
    }))
}

/// Clear the session's favorites
pub async fn clear_favorites(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> AppResult<Json<FavoritesResponse>> {
    state.movie_data()?;
    let mut inner = state.inner.write().await;
    inner.session_mut(session_id).favorites.clear();

    tracing::info!(session_id = %session_id, "Cleared favorites");

    Ok(Json(FavoritesResponse {
        favorites: Vec::new(),
    }))
}

/// Request body that may be left out entirely
///
/// A POST without a JSON body uses the defaults; a body that is present but
/// malformed is still rejected.
fn optional_body<T: Default>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(e) => Err(AppError::InvalidInput(e.body_text())),
    }
}

/// Runs a lookup and records it as the session's selection and last results
fn run_recommendation(
    data: &MovieData,
    session: &mut SessionState,
    query: String,
    count: usize,
    session_id: &SessionId,
) -> AppResult<RecommendationSet> {
    let recommendations = recommend(&query, &data.catalog, &data.matrix, count).map_err(|e| {
        tracing::warn!(session_id = %session_id, query = %query, error = %e, "Recommendation failed");
        e
    })?;

    tracing::info!(
        session_id = %session_id,
        query = %query,
        count = recommendations.len(),
        "Recommendations served"
    );

    let results = RecommendationSet {
        query: query.clone(),
        recommendations,
    };
    session.select(query);
    session.last_results = Some(results.clone());
    Ok(results)
}
