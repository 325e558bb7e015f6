// crates/ordermart-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file discovery pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Malformed record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input directory error: {0}")]
    InputDir(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EtlError>;
