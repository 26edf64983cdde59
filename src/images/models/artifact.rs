use crate::images::enums::artifact_kind::ArtifactKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub message: String,
}

impl Artifact {
    pub fn download_url(&self) -> String {
        format!("/download/{}", self.file_name)
    }
}
