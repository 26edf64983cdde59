use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{app, downloads, images, AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);
    let body_limit = DefaultBodyLimit::max(state.envy.max_upload_bytes());

    Router::new()
        .route("/", get(app::controller::get_root))
        // images
        .route("/process-image", post(images::controller::process_image))
        // downloads
        .route(
            "/download/:filename",
            get(downloads::controller::download_file),
        )
        // layers
        .layer(ServiceBuilder::new().layer(cors).layer(body_limit))
        .with_state(state)
}
