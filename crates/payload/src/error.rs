use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}
