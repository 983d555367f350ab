use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProgressError>;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Failed to read gamification file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Gamification parse error: {0}")]
    Parse(String),

    #[error("gamification.schema_version {0} is not supported (expected 1)")]
    UnsupportedSchema(u32),

    #[error("Gamification config has unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("Invalid tier ladder: {0}")]
    InvalidLadder(String),
}
