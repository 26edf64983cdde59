use serde::Serialize;
use serde_json::{Map, Value};

pub const FILE_DATA_TYPE: &str = "gradio.FileData";

#[derive(Debug, Serialize)]
pub struct FileData {
    pub path: String,
    pub meta: FileDataMeta,
}

#[derive(Debug, Serialize)]
pub struct FileDataMeta {
    #[serde(rename = "_type")]
    pub type_: String,
}

impl FileData {
    pub fn from_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            meta: FileDataMeta {
                type_: FILE_DATA_TYPE.to_string(),
            },
        }
    }
}

pub fn is_file_data(record: &Map<String, Value>) -> bool {
    record
        .get("meta")
        .and_then(|meta| meta.get("_type"))
        .and_then(Value::as_str)
        == Some(FILE_DATA_TYPE)
}
