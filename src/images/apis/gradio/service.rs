use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, multipart, StatusCode};
use serde_json::Value;

use crate::{
    app::{
        envy::Envy,
        models::api_error::ApiError,
        util::{
            files::sanitize_file_name, multipart::models::file_properties::FileProperties,
            reqwest::build_client,
        },
    },
    images::{
        apis::predictor::Predictor,
        models::{
            generation_request::GenerationRequest,
            prediction_output::{PredictionOutput, OUTPUT_URL_FIELD},
        },
    },
};

use super::{
    models::{file_data::is_file_data, input_spec::InputSpec},
    structs::{
        gradio_call_response::GradioCallResponse,
        gradio_event::{GradioEvent, GradioEventType},
    },
};

/// Largest pending event the stream reader buffers before giving up.
pub const MAX_EVENT_BYTES: usize = 16 * 1024 * 1024;

/// Client for a hosted Gradio app, using its upload, call and event stream
/// routes.
#[derive(Debug, Clone)]
pub struct GradioPredictor {
    client: reqwest::Client,
    base_url: String,
    api_name: String,
    hf_token: Option<String>,
    max_event_bytes: usize,
}

impl GradioPredictor {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_name: &str,
        hf_token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_name: api_name.trim_matches('/').to_string(),
            hf_token,
            max_event_bytes: MAX_EVENT_BYTES,
        }
    }

    pub fn with_max_event_bytes(mut self, max_event_bytes: usize) -> Self {
        self.max_event_bytes = max_event_bytes;
        self
    }

    pub fn from_envy(envy: &Envy) -> Result<Self, reqwest::Error> {
        let client = build_client(envy.prediction_timeout())?;

        Ok(Self::new(
            client,
            envy.gradio_url(),
            envy.gradio_api_name(),
            envy.hf_token.clone(),
        ))
    }

    fn headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();

        if let Some(token) = &self.hf_token {
            match format!("Bearer {}", token).parse() {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(e) => tracing::warn!("ignoring malformed hf token: {}", e),
            }
        }

        headers
    }

    async fn upload_file(&self, image: &FileProperties) -> Result<String, ApiError> {
        let file_name =
            sanitize_file_name(&image.file_name).unwrap_or_else(|| "image".to_string());
        let part = multipart::Part::bytes(image.data.to_vec()).file_name(file_name);
        let part = match part.mime_str(&image.mime_type) {
            Ok(part) => part,
            Err(_) => multipart::Part::bytes(image.data.to_vec()).file_name("image"),
        };
        let form = multipart::Form::new().part("files", part);

        let url = format!("{}/upload", self.base_url);
        let result = self
            .client
            .post(url)
            .headers(self.headers())
            .multipart(form)
            .send()
            .await;

        let text = read_text(result, "upload_file").await?;
        let paths: Vec<String> = match serde_json::from_str(&text) {
            Ok(paths) => paths,
            Err(_) => {
                tracing::warn!("upload_file (1): {:?}", text);
                return Err(prediction_error("Failed to upload image to prediction service."));
            }
        };

        match paths.into_iter().next() {
            Some(path) => Ok(path),
            None => Err(prediction_error("Prediction service stored no files.")),
        }
    }

    async fn submit(&self, input_spec: &InputSpec) -> Result<String, ApiError> {
        let url = format!("{}/call/{}", self.base_url, self.api_name);
        let result = self
            .client
            .post(url)
            .headers(self.headers())
            .json(input_spec)
            .send()
            .await;

        let text = read_text(result, "submit").await?;
        match serde_json::from_str::<GradioCallResponse>(&text) {
            Ok(res) => Ok(res.event_id),
            Err(_) => {
                tracing::warn!("submit (1): {:?}", text);
                Err(prediction_error("Prediction service returned no event id."))
            }
        }
    }

    async fn await_completion(&self, event_id: &str) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/call/{}/{}", self.base_url, self.api_name, event_id);
        let res = match self.client.get(url).headers(self.headers()).send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!("await_completion (1): {:?}", e);
                return Err(prediction_error(format!("Prediction request failed: {}", e)));
            }
        };

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::warn!("await_completion (2): {} {:?}", status, text);
            return Err(prediction_error(format!(
                "Prediction service responded with {}",
                status
            )));
        }

        let mut stream = res.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::warn!("await_completion (3): {:?}", e);
                    return Err(prediction_error(format!("Prediction stream failed: {}", e)));
                }
            };
            buffer.extend(chunk.iter().filter(|b| **b != b'\r'));

            while let Some(event) = GradioEvent::take_from(&mut buffer) {
                if let Some(result) = handle_event(event_id, event) {
                    return result;
                }
            }

            if buffer.len() > self.max_event_bytes {
                tracing::warn!(
                    "await_completion (4): {} buffered {} bytes",
                    event_id,
                    buffer.len()
                );
                return Err(prediction_error(format!(
                    "Prediction event exceeded {} bytes.",
                    self.max_event_bytes
                )));
            }
        }

        // a final event may arrive without the trailing blank line
        buffer.extend_from_slice(b"\n\n");
        while let Some(event) = GradioEvent::take_from(&mut buffer) {
            if let Some(result) = handle_event(event_id, event) {
                return result;
            }
        }

        tracing::warn!("await_completion (5): stream for {} ended early", event_id);
        Err(prediction_error("Prediction stream ended without a result."))
    }

    /// Gradio file outputs carry their location as `url` (or a server side
    /// `path`); expose it under `output_url`.
    fn normalize_output(&self, outputs: Vec<Value>) -> PredictionOutput {
        let Some(first) = outputs.first().cloned() else {
            return PredictionOutput::Unrecognized(Value::Array(outputs));
        };

        match PredictionOutput::from_value(first) {
            PredictionOutput::Record(mut record) if is_file_data(&record) => {
                if !record.contains_key(OUTPUT_URL_FIELD) {
                    let url = match (record.get("url"), record.get("path")) {
                        (Some(Value::String(url)), _) => Some(url.to_string()),
                        (_, Some(Value::String(path))) => {
                            Some(format!("{}/file={}", self.base_url, path))
                        }
                        _ => None,
                    };

                    if let Some(url) = url {
                        record.insert(OUTPUT_URL_FIELD.to_string(), Value::String(url));
                    }
                }

                PredictionOutput::Record(record)
            }
            output => output,
        }
    }
}

#[async_trait]
impl Predictor for GradioPredictor {
    async fn predict(
        &self,
        image: &FileProperties,
        request: &GenerationRequest,
    ) -> Result<PredictionOutput, ApiError> {
        let uploaded_path = self.upload_file(image).await?;
        tracing::debug!("uploaded {} as {}", image.file_name, uploaded_path);

        let input_spec = InputSpec::image_variation(&uploaded_path, request);
        let event_id = self.submit(&input_spec).await?;
        tracing::debug!("submitted {} with seed {}", event_id, request.seed);

        let outputs = self.await_completion(&event_id).await?;
        Ok(self.normalize_output(outputs))
    }
}

/// `None` means keep reading.
fn handle_event(event_id: &str, event: GradioEvent) -> Option<Result<Vec<Value>, ApiError>> {
    match event.event.as_str() {
        GradioEventType::COMPLETE => match serde_json::from_str::<Vec<Value>>(&event.data) {
            Ok(outputs) => Some(Ok(outputs)),
            Err(_) => {
                tracing::warn!("handle_event (1): {:?}", event.data);
                Some(Err(prediction_error(
                    "Failed to decode prediction output.",
                )))
            }
        },
        GradioEventType::ERROR => {
            let message = match serde_json::from_str::<Value>(&event.data) {
                Ok(Value::String(message)) => message,
                Ok(Value::Null) => "unknown error".to_string(),
                Ok(value) => value.to_string(),
                Err(_) if event.data.trim().is_empty() => "unknown error".to_string(),
                Err(_) => event.data.to_string(),
            };
            tracing::warn!("prediction {} failed: {}", event_id, message);
            Some(Err(prediction_error(format!("Prediction failed: {}", message))))
        }
        GradioEventType::GENERATING | GradioEventType::HEARTBEAT => {
            tracing::debug!("prediction {}: {}", event_id, event.event);
            None
        }
        other => {
            tracing::debug!("prediction {}: ignoring {} event", event_id, other);
            None
        }
    }
}

async fn read_text(
    result: Result<reqwest::Response, reqwest::Error>,
    label: &str,
) -> Result<String, ApiError> {
    let res = match result {
        Ok(res) => res,
        Err(e) => {
            tracing::warn!("{} (3): {:?}", label, e);
            return Err(prediction_error(format!("Prediction request failed: {}", e)));
        }
    };

    let status = res.status();
    let text = match res.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{} (2): {:?}", label, e);
            return Err(prediction_error(format!("Prediction request failed: {}", e)));
        }
    };

    if !status.is_success() {
        tracing::warn!("{} (4): {} {:?}", label, status, text);
        return Err(prediction_error(format!(
            "Prediction service responded with {}",
            status
        )));
    }

    Ok(text)
}

fn prediction_error(message: impl Into<String>) -> ApiError {
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
}
