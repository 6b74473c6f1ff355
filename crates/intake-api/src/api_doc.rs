//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use intake_core::{SideTag, UploadResponse};
use intake_infra::ErrorResponse;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        version = "0.1.0",
        description = "Stores identity-document images for the registration form"
    ),
    paths(handlers::upload::upload_id_image),
    components(schemas(UploadResponse, ErrorResponse, SideTag)),
    tags((name = "upload", description = "Identity image upload"))
)]
struct ApiDoc;
