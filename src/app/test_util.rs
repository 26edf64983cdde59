use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

use crate::{
    app::{
        envy::Envy, models::api_error::ApiError, router::create_router,
        util::multipart::models::file_properties::FileProperties,
    },
    images::{
        apis::predictor::Predictor,
        models::{generation_request::GenerationRequest, prediction_output::PredictionOutput},
    },
    AppState,
};

/// Serves `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let server = axum::Server::bind(&addr).serve(router.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(async move {
        if let Err(e) = server.await {
            tracing::error!(%e);
        }
    });

    addr
}

pub async fn temp_output_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("restora-api-test-{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    dir
}

/// Returns the same canned result for every call.
pub struct StaticPredictor(pub Result<PredictionOutput, ApiError>);

#[async_trait]
impl Predictor for StaticPredictor {
    async fn predict(
        &self,
        _image: &FileProperties,
        _request: &GenerationRequest,
    ) -> Result<PredictionOutput, ApiError> {
        self.0.clone()
    }
}

/// Answers with the uploaded bytes.
pub struct EchoPredictor;

#[async_trait]
impl Predictor for EchoPredictor {
    async fn predict(
        &self,
        image: &FileProperties,
        _request: &GenerationRequest,
    ) -> Result<PredictionOutput, ApiError> {
        Ok(PredictionOutput::Binary(image.data.clone()))
    }
}

pub struct TestApp {
    pub address: String,
    pub output_dir: PathBuf,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(predictor: impl Predictor + 'static, unique_artifact_names: bool) -> Self {
        let output_dir = temp_output_dir().await;
        let envy = Envy {
            output_dir: Some(output_dir.to_string_lossy().to_string()),
            unique_artifact_names: Some(unique_artifact_names),
            ..Default::default()
        };
        let state = AppState {
            envy: Arc::new(envy),
            predictor: Arc::new(predictor),
            http: reqwest::Client::new(),
        };

        let addr = spawn(create_router(state)).await;

        Self {
            address: format!("http://{}", addr),
            output_dir,
            client: reqwest::Client::new(),
        }
    }

    pub async fn upload(&self, file_name: &str, data: Vec<u8>) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str("image/png")
            .unwrap();
        let form = reqwest::multipart::Form::new().part("image", part);

        self.client
            .post(format!("{}/process-image", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
