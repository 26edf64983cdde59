use axum::{extract::State, Json};

use crate::{
    app::models::{api_error::ApiError, multipart_from_request::MultipartFromRequest},
    AppState,
};

use super::{models::process_image_response::ProcessImageResponse, service};

pub async fn process_image(
    State(state): State<AppState>,
    MultipartFromRequest(multipart): MultipartFromRequest,
) -> Result<Json<ProcessImageResponse>, ApiError> {
    match service::process_image(multipart, &state).await {
        Ok(res) => Ok(Json(res)),
        Err(e) => Err(e),
    }
}
