use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::session_id::{make_span_with_session_id, session_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats))
        // Catalog
        .route("/movies", get(handlers::get_movies))
        .route("/movies/search", get(handlers::search_movies))
        // Session
        .route("/session", get(handlers::get_session))
        .route("/session/selection", put(handlers::set_selection))
        // Recommendations
        .route("/recommendations", post(handlers::get_recommendations))
        .route("/recommendations/surprise", post(handlers::surprise))
        .route(
            "/recommendations/more-like-this",
            post(handlers::more_like_this),
        )
        .route("/recommendations/share", get(handlers::share_results))
        // Discovery
        .route("/random-picks", post(handlers::random_picks))
        // Favorites
        .route(
            "/favorites",
            get(handlers::get_favorites)
                .post(handlers::add_favorites)
                .delete(handlers::clear_favorites),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_session_id))
        .layer(middleware::from_fn(session_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
