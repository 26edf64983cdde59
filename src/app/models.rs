pub mod api_error;
pub mod multipart_from_request;
