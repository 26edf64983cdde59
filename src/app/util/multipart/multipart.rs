use axum::{extract::Multipart, http::StatusCode};

use crate::app::models::api_error::ApiError;

use super::models::file_properties::FileProperties;

/// Reads fields until a file part named `field_name` is found. Other fields,
/// including plain text parts with the same name, are drained and ignored.
pub async fn get_file_by_field_name(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Option<FileProperties>, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!(%e);
                return Err(ApiError::new(StatusCode::BAD_REQUEST, e.to_string()));
            }
        };

        if field.name() != Some(field_name) {
            continue;
        }
        let Some(file_name) = field.file_name().map(|name| name.to_string()) else {
            continue;
        };

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(%e);
                return Err(ApiError::new(StatusCode::BAD_REQUEST, e.to_string()));
            }
        };

        return Ok(Some(FileProperties {
            field_name: field_name.to_string(),
            file_name,
            mime_type,
            data,
        }));
    }
}
