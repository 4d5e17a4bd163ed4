use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the I/O edges of the netting table.
///
/// Building a graph and running the cycle canceller never fail; only loading
/// input matrices and decoding/encoding payloads do.
#[derive(Debug, Error)]
pub enum NettingError {
    #[error("invalid numeric token {token:?} at position {position}")]
    InputFormat { token: String, position: usize },
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed claim graph payload: {0}")]
    Decode(String),
    #[error("failed to encode claim graph: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NettingError>;
