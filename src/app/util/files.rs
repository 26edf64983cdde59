use std::path::Path;

use uuid::Uuid;

/// Reduces a client supplied file name to its last path component, without
/// leading dots. Returns `None` when nothing usable remains.
pub fn sanitize_file_name(file_name: &str) -> Option<String> {
    let last = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim().trim_start_matches('.').trim_start();

    match cleaned {
        "" => None,
        name => Some(name.to_string()),
    }
}

/// True when `file_name` can be joined onto a directory without leaving it.
pub fn is_plain_file_name(file_name: &str) -> bool {
    sanitize_file_name(file_name).as_deref() == Some(file_name)
}

/// Writes to a hidden sibling first and renames it into place, so readers
/// only ever see a complete file.
pub async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("artifact");
    let tmp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    tokio::fs::write(&tmp_path, data).await?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_util;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_file_name("ruin.jpg").as_deref(), Some("ruin.jpg"));
        assert_eq!(
            sanitize_file_name("old castle.png").as_deref(),
            Some("old castle.png")
        );
    }

    #[test]
    fn strips_directories() {
        assert_eq!(
            sanitize_file_name("../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(
            sanitize_file_name("C:\\Users\\me\\ruin.png").as_deref(),
            Some("ruin.png")
        );
    }

    #[test]
    fn rejects_empty_and_dot_names() {
        assert_eq!(sanitize_file_name(""), None);
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name("images/"), None);
        assert_eq!(sanitize_file_name(" \n "), None);
        assert_eq!(sanitize_file_name("..."), None);
    }

    #[test]
    fn strips_leading_dots() {
        assert_eq!(sanitize_file_name(".ruin.png").as_deref(), Some("ruin.png"));
        assert_eq!(sanitize_file_name("../.env").as_deref(), Some("env"));
        assert_eq!(sanitize_file_name(". hidden.txt").as_deref(), Some("hidden.txt"));
    }

    #[test]
    fn plain_file_names() {
        assert!(is_plain_file_name("output.png"));
        assert!(!is_plain_file_name("../output.png"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("a/b"));
        assert!(!is_plain_file_name(".ruin.png"));
    }

    #[tokio::test]
    async fn write_file_replaces_previous_content() {
        let dir = test_util::temp_output_dir().await;
        let path = dir.join("output.txt");

        write_file(&path, b"first").await.unwrap();
        write_file(&path, b"second").await.unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"second");

        let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
