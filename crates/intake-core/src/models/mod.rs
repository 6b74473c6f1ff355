pub mod lead;
pub mod upload;

pub use lead::Lead;
pub use upload::{SelectedFile, SideTag, UploadResponse};
