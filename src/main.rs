use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use crate::{
    app::{envy::Envy, router::create_router, util::reqwest::build_client},
    images::apis::{gradio::service::GradioPredictor, predictor::Predictor},
};

mod app;
mod downloads;
mod images;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub predictor: Arc<dyn Predictor>,
    /// Used for fetching result urls returned by the predictor.
    pub http: reqwest::Client,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("restora_api=debug")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    tracing::info!(
        "starting in {} mode",
        envy.app_env.as_deref().unwrap_or("development")
    );

    // properties
    let port = envy.port();
    let output_dir = envy.output_dir();

    tokio::fs::create_dir_all(&output_dir)
        .await
        .expect("failed to create output directory");

    tracing::info!("writing outputs to {}", output_dir.display());

    let predictor =
        GradioPredictor::from_envy(&envy).expect("failed to build prediction client");
    let http = build_client(envy.fetch_timeout()).expect("failed to build http client");

    tracing::info!(
        "predicting with {}/call/{}",
        envy.gradio_url(),
        envy.gradio_api_name()
    );

    let state = AppState {
        envy: Arc::new(envy),
        predictor: Arc::new(predictor),
        http,
    };

    // app
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server error");
}
