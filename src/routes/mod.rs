mod health;
mod sounds;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::store::MAX_UPLOAD_SIZE;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cdn_service = ServeDir::new(&state.storage_path);

    Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .route(
            "/api/sounds",
            get(sounds::get_sound_missing_id).post(sounds::create_sound),
        )
        .route("/api/sounds/{sound_id}", get(sounds::get_sound))
        .nest_service("/cdn", cdn_service)
        // Multipart framing adds a little on top of the file itself
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
