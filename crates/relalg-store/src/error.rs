use thiserror::Error;

/// Result type local to relalg-store.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("unsupported codec: {0}")]
    CodecUnsupported(&'static str),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("snapshot format error: {0}")]
    Format(String),

    #[error(transparent)]
    Core(#[from] relalg_core::Error),
}
