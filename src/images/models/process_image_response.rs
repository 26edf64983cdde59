use serde::{Deserialize, Serialize};

use super::artifact::Artifact;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessImageResponse {
    pub message: String,
    pub download_url: String,
}

impl From<&Artifact> for ProcessImageResponse {
    fn from(artifact: &Artifact) -> Self {
        Self {
            message: artifact.message.to_string(),
            download_url: artifact.download_url(),
        }
    }
}
