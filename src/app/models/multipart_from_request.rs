use axum::{
    async_trait,
    body::{Bytes, HttpBody},
    extract::{FromRequest, Multipart},
    http::Request,
    BoxError,
};

use super::api_error::ApiError;

/// `Multipart` whose rejection renders as an `ApiError`.
pub struct MultipartFromRequest(pub Multipart);

#[async_trait]
impl<S, B> FromRequest<S, B> for MultipartFromRequest
where
    B: HttpBody + Send + 'static,
    B::Data: Into<Bytes>,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Ok(Self(multipart))
    }
}
