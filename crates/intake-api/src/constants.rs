/// Prefix for all API routes
pub const API_PREFIX: &str = "/api";

/// Route the local storage backend's files are served from
pub const LOCAL_FILES_ROUTE: &str = "/files";

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the side tag
pub const SIDE_FIELD: &str = "type";

/// Extra bytes allowed on top of the file size limit for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
