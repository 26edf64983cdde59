use std::path::Path;

use axum::{
    body::StreamBody,
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::app::{
    errors::DefaultApiError, models::api_error::ApiError, util::files::is_plain_file_name,
};

use super::errors::DownloadsApiError;

pub async fn download_file(file_name: &str, output_dir: &Path) -> Result<Response, ApiError> {
    if !is_plain_file_name(file_name) {
        tracing::warn!("rejected download name {:?}", file_name);
        return Err(DownloadsApiError::FileNotFound.value());
    }

    let path = output_dir.join(file_name);
    let is_file = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata.is_file(),
        Err(_) => false,
    };
    if !is_file {
        return Err(DownloadsApiError::FileNotFound.value());
    }

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("failed to open {}: {}", file_name, e);
            return Err(DefaultApiError::InternalServerError.value());
        }
    };

    let body = StreamBody::new(ReaderStream::new(file));
    let headers = [
        (header::CONTENT_TYPE, content_type(file_name).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
        ),
    ];

    Ok((headers, body).into_response())
}

fn content_type(file_name: &str) -> mime::Mime {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("txt") => mime::TEXT_PLAIN_UTF_8,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type("output.png"), mime::IMAGE_PNG);
        assert_eq!(content_type("RUIN.JPG"), mime::IMAGE_JPEG);
        assert_eq!(content_type("output.txt"), mime::TEXT_PLAIN_UTF_8);
        assert_eq!(content_type("archive"), mime::APPLICATION_OCTET_STREAM);
    }
}
