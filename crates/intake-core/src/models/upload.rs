use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Which face of the identity document an image shows.
///
/// Anything other than `front` or `back` (including a missing value) is
/// recorded as `unknown` so the value can be embedded in a storage key as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SideTag {
    Front,
    Back,
    Unknown,
}

impl SideTag {
    /// Parse the `type` multipart field.
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("front") => SideTag::Front,
            Some("back") => SideTag::Back,
            _ => SideTag::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SideTag::Front => "front",
            SideTag::Back => "back",
            SideTag::Unknown => "unknown",
        }
    }
}

impl Display for SideTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Body returned by `POST /api/upload` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Publicly readable URL of the stored image
    pub url: String,
    /// Storage pathname (key) of the stored image
    pub pathname: String,
}

/// A file picked by the user for one side of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Whether the browser-reported type is an image (drives the preview).
    pub fn is_image(&self) -> bool {
        self.content_type.to_lowercase().starts_with("image/")
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}
