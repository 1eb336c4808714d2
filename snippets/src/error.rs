use std::path::PathBuf;

use thiserror::Error;

use crate::scanner::ScanError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Pattern(#[from] ScanError),
}
