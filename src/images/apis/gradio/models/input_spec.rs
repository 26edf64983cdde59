use serde::Serialize;
use serde_json::{json, Value};

use crate::images::models::generation_request::GenerationRequest;

use super::file_data::FileData;

#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub data: Vec<Value>,
}

impl InputSpec {
    /// Positional arguments of the space's image variation endpoint.
    pub fn image_variation(uploaded_path: &str, request: &GenerationRequest) -> Self {
        Self {
            data: vec![
                json!([FileData::from_path(uploaded_path)]),
                json!(request.text),
                json!(request.negative_text),
                json!(request.similarity_strength),
                json!(request.height),
                json!(request.width),
                json!(request.quality),
                json!(request.cfg_scale),
                json!(request.seed),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_variation_argument_order() {
        let request = GenerationRequest::with_seed(7);
        let spec = InputSpec::image_variation("/tmp/gradio/abc/ruin.png", &request);
        let value = serde_json::to_value(&spec).unwrap();

        assert_eq!(
            value["data"][0],
            json!([{ "path": "/tmp/gradio/abc/ruin.png", "meta": { "_type": "gradio.FileData" } }])
        );
        assert_eq!(value["data"][1], json!(request.text));
        assert_eq!(value["data"][2], json!(request.negative_text));
        assert_eq!(value["data"][3], json!(0.7));
        assert_eq!(value["data"][4], json!(1024));
        assert_eq!(value["data"][5], json!(1024));
        assert_eq!(value["data"][6], json!("standard"));
        assert_eq!(value["data"][7], json!(10));
        assert_eq!(value["data"][8], json!(7));
    }
}
