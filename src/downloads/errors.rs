use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum DownloadsApiError {
    FileNotFound,
}

impl DownloadsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::FileNotFound => ApiError::new(StatusCode::NOT_FOUND, "File not found"),
        }
    }
}
