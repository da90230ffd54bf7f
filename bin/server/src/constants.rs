/// Default storage root for document blobs
pub const DEFAULT_ROOT_DIR: &str = "document_data";

/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: &str = "8080";

/// Metadata backend identifier for PostgreSQL
pub const METADATA_BACKEND_DATABASE: &str = "db";

/// Metadata backend identifier for the in-memory repository (default;
/// development only, rows are lost on restart)
pub const METADATA_BACKEND_MEMORY: &str = "mem";
