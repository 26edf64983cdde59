use std::time::Duration;

use axum::http::StatusCode;
use bytes::Bytes;

use crate::app::models::api_error::ApiError;

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

pub async fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Bytes, ApiError> {
    let res = match client.get(url).send().await {
        Ok(res) => res,
        Err(e) => {
            tracing::error!(%e);
            return Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get url response: {}", e),
            ));
        }
    };

    let res = match res.error_for_status() {
        Ok(res) => res,
        Err(e) => {
            tracing::error!(%e);
            return Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get url response: {}", e),
            ));
        }
    };

    match res.bytes().await {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::error!(%e);
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get bytes from response: {}", e),
            ))
        }
    }
}
