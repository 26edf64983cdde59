use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_GRADIO_URL: &str = "https://hatman-aws-nova-canvas.hf.space/gradio_api";
pub const DEFAULT_GRADIO_API_NAME: &str = "image_variation";
pub const DEFAULT_PREDICTION_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envy {
    pub app_env: Option<String>,
    pub port: Option<u16>,

    pub output_dir: Option<String>,
    pub unique_artifact_names: Option<bool>,
    pub max_upload_bytes: Option<usize>,

    pub gradio_url: Option<String>,
    pub gradio_api_name: Option<String>,
    pub hf_token: Option<String>,

    pub prediction_timeout_secs: Option<u64>,
    pub fetch_timeout_secs: Option<u64>,
}

impl Envy {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(
            self.output_dir
                .as_deref()
                .unwrap_or(DEFAULT_OUTPUT_DIR),
        )
    }

    /// When false, every request writes to the same `output.png` / `output.txt`
    /// and concurrent requests of one kind overwrite each other.
    pub fn unique_artifact_names(&self) -> bool {
        self.unique_artifact_names.unwrap_or(true)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn gradio_url(&self) -> &str {
        self.gradio_url
            .as_deref()
            .unwrap_or(DEFAULT_GRADIO_URL)
            .trim_end_matches('/')
    }

    pub fn gradio_api_name(&self) -> &str {
        self.gradio_api_name
            .as_deref()
            .unwrap_or(DEFAULT_GRADIO_API_NAME)
            .trim_matches('/')
    }

    pub fn prediction_timeout(&self) -> Duration {
        Duration::from_secs(
            self.prediction_timeout_secs
                .unwrap_or(DEFAULT_PREDICTION_TIMEOUT_SECS),
        )
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS))
    }
}
