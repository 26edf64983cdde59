use std::path::Path;

use serde_json::Value;

use crate::app::{
    models::api_error::ApiError,
    util::{files::write_file, reqwest::get_bytes},
};

use super::{
    enums::artifact_kind::ArtifactKind,
    errors::ImagesApiError,
    models::{
        artifact::Artifact,
        prediction_output::{PredictionOutput, OUTPUT_URL_FIELD},
    },
};

/// Persists a prediction result into `output_dir`. Remote records are fetched
/// with `client`.
pub async fn materialize(
    output: PredictionOutput,
    output_dir: &Path,
    request_id: Option<&str>,
    client: &reqwest::Client,
) -> Result<Artifact, ApiError> {
    match output {
        PredictionOutput::Binary(bytes) => {
            save(
                ArtifactKind::Image,
                &bytes,
                output_dir,
                request_id,
                "Image processed successfully",
            )
            .await
        }
        PredictionOutput::Text(text) => {
            save(
                ArtifactKind::Text,
                text.as_bytes(),
                output_dir,
                request_id,
                "Text result saved successfully",
            )
            .await
        }
        PredictionOutput::Record(record) => {
            let Some(Value::String(url)) = record.get(OUTPUT_URL_FIELD) else {
                tracing::warn!("record without {}: {:?}", OUTPUT_URL_FIELD, record);
                return Err(ImagesApiError::UnexpectedStructure(Value::Object(record)).value());
            };

            tracing::debug!("fetching {}", url);
            let bytes = get_bytes(client, url).await?;

            save(
                ArtifactKind::Image,
                &bytes,
                output_dir,
                request_id,
                "Image downloaded successfully",
            )
            .await
        }
        PredictionOutput::Unrecognized(value) => {
            tracing::warn!("unrecognized prediction output: {:?}", value);
            Err(ImagesApiError::UnexpectedFormat(value).value())
        }
    }
}

async fn save(
    kind: ArtifactKind,
    data: &[u8],
    output_dir: &Path,
    request_id: Option<&str>,
    message: &str,
) -> Result<Artifact, ApiError> {
    let file_name = kind.file_name(request_id);

    if let Err(e) = write_file(&output_dir.join(&file_name), data).await {
        tracing::error!("failed to write {}: {}", file_name, e);
        return Err(ImagesApiError::FailedToSaveFile.value());
    }

    Ok(Artifact {
        kind,
        file_name,
        message: message.to_string(),
    })
}
