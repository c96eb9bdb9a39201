pub mod anime;

use std::path::Path;

use axum::{http::Method, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{error::handle_panic, AppState};

/// Full application: the `/api/anime` surface plus the static front-end.
pub fn router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .nest(
            "/api/anime",
            Router::new()
                .route("/popular", get(anime::get_popular))
                .route("/search", get(anime::search))
                .route("/season/now", get(anime::get_season_now))
                .route("/season/:year/:season", get(anime::get_season))
                .route("/:id", get(anime::get_anime))
                .route("/:id/episodes", get(anime::get_episodes))
                .route("/:id/episode/:episode_id/stream", get(anime::get_stream)),
        )
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
