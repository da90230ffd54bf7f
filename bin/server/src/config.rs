use std::path::PathBuf;

use clap::{Arg, Command};

use crate::constants::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_ROOT_DIR, METADATA_BACKEND_DATABASE,
    METADATA_BACKEND_MEMORY,
};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Metadata repository backend
    pub metadata_backend: MetadataBackend,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Storage root for document blobs
    pub root_dir: PathBuf,
    /// Database URL for the PostgreSQL backend
    pub database_url: Option<String>,
}

/// Metadata repository backend type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataBackend {
    Database,
    Memory,
}

impl ServerConfig {
    pub fn load() -> Result<Self, std::io::Error> {
        let matches = Command::new("server")
            .arg(
                Arg::new("metadata")
                    .long("metadata")
                    .value_name("TYPE")
                    .help("Metadata backend: 'db' for PostgreSQL or 'mem' for in-memory")
                    .default_value(METADATA_BACKEND_MEMORY),
            )
            .arg(
                Arg::new("root-dir")
                    .long("root-dir")
                    .value_name("DIR")
                    .help("Storage root directory for document blobs")
                    .default_value(DEFAULT_ROOT_DIR),
            )
            .arg(
                Arg::new("database-url")
                    .long("database-url")
                    .value_name("URL")
                    .help("Database URL for the 'db' backend (can also use DATABASE_URL env var)"),
            )
            .arg(
                Arg::new("port")
                    .long("port")
                    .value_name("PORT")
                    .help("Server port (default: 8080, or SERVER_PORT env var)"),
            )
            .arg(
                Arg::new("host")
                    .long("host")
                    .value_name("HOST")
                    .help("Server host (default: 0.0.0.0, or SERVER_HOST env var)"),
            )
            .get_matches();

        let backend_str = matches
            .get_one::<String>("metadata")
            .map(|s| s.as_str())
            .unwrap_or(METADATA_BACKEND_MEMORY);
        let metadata_backend = match backend_str {
            METADATA_BACKEND_DATABASE => MetadataBackend::Database,
            METADATA_BACKEND_MEMORY => MetadataBackend::Memory,
            _ => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "Invalid metadata backend: {}. Must be '{}' or '{}'",
                        backend_str, METADATA_BACKEND_DATABASE, METADATA_BACKEND_MEMORY
                    ),
                ));
            }
        };

        let root_dir = PathBuf::from(
            matches
                .get_one::<String>("root-dir")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_ROOT_DIR),
        );

        let database_url = if metadata_backend == MetadataBackend::Database {
            Some(
                matches
                    .get_one::<String>("database-url")
                    .cloned()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        std::io::Error::new(
                            std::io::ErrorKind::InvalidInput,
                            "Database URL required for the 'db' backend. Set --database-url or DATABASE_URL env var",
                        )
                    })?,
            )
        } else {
            None
        };

        let env_host = std::env::var("SERVER_HOST").ok();
        let env_port = std::env::var("SERVER_PORT").ok();

        let host = matches
            .get_one::<String>("host")
            .map(|s| s.as_str())
            .or(env_host.as_deref())
            .unwrap_or(DEFAULT_HOST)
            .to_string();

        let port_str = matches
            .get_one::<String>("port")
            .map(|s| s.as_str())
            .or(env_port.as_deref())
            .unwrap_or(DEFAULT_PORT);

        let port = port_str.parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid port number: {}", port_str),
            )
        })?;

        Ok(ServerConfig {
            metadata_backend,
            host,
            port,
            root_dir,
            database_url,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
