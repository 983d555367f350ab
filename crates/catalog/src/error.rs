use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("catalog.schema_version {0} is not supported (expected 1)")]
    UnsupportedSchema(u32),

    #[error("Catalog config has unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}
