use bytes::Bytes;
use serde_json::{Map, Value};

pub const OUTPUT_URL_FIELD: &str = "output_url";

/// Shape of a remote prediction result, decided once where the response is
/// decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutput {
    Binary(Bytes),
    Text(String),
    Record(Map<String, Value>),
    Unrecognized(Value),
}

impl PredictionOutput {
    /// Strings holding a base64 `data:` URL are decoded into `Binary`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => match decode_data_url(&text) {
                Some(bytes) => Self::Binary(bytes),
                None => Self::Text(text),
            },
            Value::Object(record) => Self::Record(record),
            other => Self::Unrecognized(other),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Binary(_) => "binary",
            Self::Text(_) => "text",
            Self::Record(_) => "record",
            Self::Unrecognized(_) => "unrecognized",
        }
    }
}

fn decode_data_url(text: &str) -> Option<Bytes> {
    let rest = text.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(";base64,")?;

    base64::decode(payload.trim()).ok().map(Bytes::from)
}
