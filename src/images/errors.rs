use axum::http::StatusCode;
use serde_json::Value;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum ImagesApiError {
    NoImageProvided,
    FailedToSaveFile,
    UnexpectedStructure(Value),
    UnexpectedFormat(Value),
}

impl ImagesApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::NoImageProvided => {
                ApiError::new(StatusCode::BAD_REQUEST, "No image file provided")
            }
            Self::FailedToSaveFile => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save file.")
            }
            Self::UnexpectedStructure(content) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected JSON response structure",
            )
            .with_content(content.clone()),
            Self::UnexpectedFormat(content) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected API response format",
            )
            .with_content(content.clone()),
        }
    }
}
