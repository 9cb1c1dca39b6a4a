// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("can build a record only from an object-shaped value, got {0}")]
    NotAnObject(&'static str),
    #[error("CBOR error: {0}")]
    CborError(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
