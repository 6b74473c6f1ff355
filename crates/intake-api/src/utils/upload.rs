//! Multipart parsing for the upload endpoint

use axum::extract::Multipart;
use intake_core::{AppError, SelectedFile};

use crate::constants::{FILE_FIELD, SIDE_FIELD};
use crate::error::HttpAppError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Fields read from an upload request.
#[derive(Debug)]
pub struct UploadForm {
    pub file: SelectedFile,
    /// Raw `type` value, if the client sent one
    pub side: Option<String>,
}

/// Read the `file` and `type` fields from a multipart body.
///
/// Unknown fields are skipped. More than one `file` field is rejected; a
/// missing `file` field is `AppError::MissingFile` whatever else was sent.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, HttpAppError> {
    let mut file: Option<SelectedFile> = None;
    let mut side: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    )
                    .into());
                }
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await?;
                file = Some(SelectedFile::new(file_name, content_type, data));
            }
            Some(SIDE_FIELD) if side.is_none() => {
                side = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let file = file.ok_or(AppError::MissingFile)?;
    Ok(UploadForm { file, side })
}
