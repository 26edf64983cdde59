#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Image,
    Text,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match *self {
            Self::Image => "png",
            Self::Text => "txt",
        }
    }

    /// `output.<ext>`, prefixed with the request id when one is given.
    pub fn file_name(&self, request_id: Option<&str>) -> String {
        match request_id {
            Some(id) => format!("{}-output.{}", id, self.extension()),
            None => format!("output.{}", self.extension()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_names() {
        assert_eq!(ArtifactKind::Image.file_name(None), "output.png");
        assert_eq!(ArtifactKind::Text.file_name(None), "output.txt");
    }

    #[test]
    fn request_scoped_names() {
        assert_eq!(
            ArtifactKind::Image.file_name(Some("abc")),
            "abc-output.png"
        );
    }
}
