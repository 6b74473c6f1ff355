//! Identity image upload handler

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use intake_core::{SideTag, UploadResponse};
use intake_infra::ErrorResponse;
use intake_storage::{keys, PutOptions};
use std::sync::Arc;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;

/// Upload one identity-document image
///
/// Stores the `file` part under `id-{side}-{unixMillis}-{filename}` plus a
/// random suffix and returns its public URL. Every call creates a new object.
///
/// # Errors
/// - `AppError::MissingFile` - no `file` part in the request
/// - `AppError::Storage` - the storage provider rejected the object
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "`file`: the image; `type`: `front` or `back`"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Failed to upload file", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(
        operation = "upload_id_image",
        side = tracing::field::Empty,
        key = tracing::field::Empty
    )
)]
pub async fn upload_id_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart?).await?;

    let side = SideTag::from_form_value(form.side.as_deref());
    let key = keys::upload_key(side, Utc::now().timestamp_millis(), &form.file.file_name);

    let span = tracing::Span::current();
    span.record("side", side.as_str());
    span.record("key", key.as_str());

    let size_bytes = form.file.size();
    let options = PutOptions::public_unique(form.file.content_type.clone());
    let stored = state.storage.store(&key, form.file.data, &options).await?;

    tracing::info!(
        pathname = %stored.pathname,
        size_bytes,
        "Identity image uploaded"
    );

    Ok(Json(UploadResponse {
        url: stored.url,
        pathname: stored.pathname,
    }))
}
