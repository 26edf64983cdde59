use async_trait::async_trait;

use crate::{
    app::{
        models::api_error::ApiError, util::multipart::models::file_properties::FileProperties,
    },
    images::models::{
        generation_request::GenerationRequest, prediction_output::PredictionOutput,
    },
};

/// A hosted model that turns an image plus generation parameters into a result.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(
        &self,
        image: &FileProperties,
        request: &GenerationRequest,
    ) -> Result<PredictionOutput, ApiError>;
}
