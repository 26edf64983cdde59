pub mod artifact;
pub mod generation_request;
pub mod prediction_output;
pub mod process_image_response;
