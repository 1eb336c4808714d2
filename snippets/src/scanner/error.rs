use thiserror::Error;

/// The matching rule could not be built from the configured fence and tag.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("fence must not be empty")]
    EmptyFence,

    #[error("invalid block pattern: {0}")]
    Regex(#[from] regex::Error),
}
