use axum::extract::Multipart;
use uuid::Uuid;

use crate::{
    app::{
        models::api_error::ApiError,
        util::{
            files::{sanitize_file_name, write_file},
            multipart::multipart::get_file_by_field_name,
        },
    },
    AppState,
};

use super::{
    errors::ImagesApiError,
    materializer,
    models::{
        generation_request::GenerationRequest, process_image_response::ProcessImageResponse,
    },
};

pub const IMAGE_FIELD: &str = "image";

pub async fn process_image(
    multipart: Multipart,
    state: &AppState,
) -> Result<ProcessImageResponse, ApiError> {
    let Some(image) = get_file_by_field_name(multipart, IMAGE_FIELD).await? else {
        return Err(ImagesApiError::NoImageProvided.value());
    };

    let request_id = Uuid::new_v4().to_string();
    let scope = match state.envy.unique_artifact_names() {
        true => Some(request_id.as_str()),
        false => None,
    };
    let output_dir = state.envy.output_dir();

    let upload_name = upload_file_name(&image.file_name, scope);
    if let Err(e) = write_file(&output_dir.join(&upload_name), &image.data).await {
        tracing::error!("failed to save upload {}: {}", upload_name, e);
        return Err(ImagesApiError::FailedToSaveFile.value());
    }
    tracing::info!(
        "request {} stored field {} as {} ({} bytes)",
        request_id,
        image.field_name,
        upload_name,
        image.data.len()
    );

    let generation_request = GenerationRequest::with_random_seed();
    let output = match state.predictor.predict(&image, &generation_request).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("request {} prediction failed: {}", request_id, e.message);
            return Err(e);
        }
    };
    tracing::info!("request {} received {} output", request_id, output.kind());

    let artifact = materializer::materialize(output, &output_dir, scope, &state.http).await?;
    tracing::info!(
        "request {} materialized {:?} artifact {}",
        request_id,
        artifact.kind,
        artifact.file_name
    );

    Ok(ProcessImageResponse::from(&artifact))
}

/// Scoped uploads get their own `<id>-upload-` prefix so they never collide
/// with the same request's `<id>-output.*` artifacts.
fn upload_file_name(client_file_name: &str, scope: Option<&str>) -> String {
    let name = sanitize_file_name(client_file_name).unwrap_or_else(|| "upload".to_string());

    match scope {
        Some(id) => format!("{}-upload-{}", id, name),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::enums::artifact_kind::ArtifactKind;

    #[test]
    fn upload_names_are_sanitized_and_scoped() {
        assert_eq!(upload_file_name("ruin.jpg", None), "ruin.jpg");
        assert_eq!(upload_file_name("../../ruin.jpg", None), "ruin.jpg");
        assert_eq!(upload_file_name("", None), "upload");
        assert_eq!(upload_file_name(".ruin.jpg", None), "ruin.jpg");
        assert_eq!(upload_file_name("ruin.jpg", Some("abc")), "abc-upload-ruin.jpg");
        assert_ne!(
            upload_file_name("output.png", Some("abc")),
            ArtifactKind::Image.file_name(Some("abc"))
        );
    }
}
