use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GradioCallResponse {
    pub event_id: String,
}
