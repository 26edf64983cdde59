use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{app::models::api_error::ApiError, AppState};

use super::service;

pub async fn download_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiError> {
    service::download_file(&file_name, &state.envy.output_dir()).await
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::Value;

    use crate::app::test_util::{EchoPredictor, TestApp};

    #[tokio::test]
    async fn serves_existing_file_as_attachment() {
        let app = TestApp::spawn(EchoPredictor, true).await;
        tokio::fs::write(app.output_dir.join("output.txt"), "hello")
            .await
            .unwrap();

        let res = app.get("/download/output.txt").await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"output.txt\""
        );
        assert_eq!(
            res.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(res.text().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let app = TestApp::spawn(EchoPredictor, true).await;

        let res = app.get("/download/nothing.png").await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "File not found");
    }

    #[tokio::test]
    async fn traversal_names_are_not_found() {
        let app = TestApp::spawn(EchoPredictor, true).await;
        let secret_name = format!("secret-{}.txt", uuid::Uuid::new_v4());
        let secret = app.output_dir.parent().unwrap().join(&secret_name);
        tokio::fs::write(&secret, "secret").await.unwrap();

        let res = app.get(&format!("/download/..%2F{}", secret_name)).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let _ = tokio::fs::remove_file(&secret).await;
    }

    #[tokio::test]
    async fn directories_are_not_found() {
        let app = TestApp::spawn(EchoPredictor, true).await;
        tokio::fs::create_dir(app.output_dir.join("nested"))
            .await
            .unwrap();

        let res = app.get("/download/nested").await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
