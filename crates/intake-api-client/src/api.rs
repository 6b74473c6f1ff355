//! Upload API domain methods.

use crate::{UploadClient, API_PREFIX};
use anyhow::{Context, Result};
use async_trait::async_trait;
use intake_core::{ImageUploader, SelectedFile, SideTag, UploadResponse};
use reqwest::multipart::{Form, Part};

impl UploadClient {
    /// Upload one identity image tagged with its side.
    pub async fn upload_id_image(&self, side: SideTag, file: SelectedFile) -> Result<UploadResponse> {
        let size_bytes = file.size();
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .with_context(|| format!("Invalid content type: {}", file.content_type))?;

        let form = Form::new()
            .text("type", side.as_str())
            .part("file", part);

        let response: UploadResponse = self
            .post_multipart(&format!("{}/upload", API_PREFIX), form)
            .await
            .with_context(|| format!("Failed to upload {} image", side))?;

        tracing::debug!(
            api = %self.base_url(),
            side = %side,
            size_bytes,
            pathname = %response.pathname,
            "Identity image uploaded"
        );
        Ok(response)
    }
}

#[async_trait]
impl ImageUploader for UploadClient {
    async fn upload(&self, side: SideTag, file: SelectedFile) -> Result<UploadResponse> {
        self.upload_id_image(side, file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn sample_file() -> SelectedFile {
        SelectedFile::new("dana.png", "image/png", b"fake-image-bytes".to_vec())
    }

    #[tokio::test]
    async fn test_upload_sends_file_and_side() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="type"\r\n\r\nfront"#.to_string()),
                Matcher::Regex(r#"name="file"; filename="dana.png""#.to_string()),
                Matcher::Regex("fake-image-bytes".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"url":"https://cdn/id-front-1-dana-x.png","pathname":"id-front-1-dana-x.png"}"#)
            .create_async()
            .await;

        let client = UploadClient::new(server.url()).unwrap();
        let response = client.upload(SideTag::Front, sample_file()).await.unwrap();

        assert_eq!(response.url, "https://cdn/id-front-1-dana-x.png");
        assert_eq!(response.pathname, "id-front-1-dana-x.png");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Failed to upload file"}"#)
            .create_async()
            .await;

        let client = UploadClient::new(server.url()).unwrap();
        let err = client
            .upload(SideTag::Back, sample_file())
            .await
            .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("back"));
        assert!(message.contains("Failed to upload file"));
        mock.assert_async().await;
    }
}
