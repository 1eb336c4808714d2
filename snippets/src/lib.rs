pub mod audit;
pub mod block;
pub mod error;
pub mod extract;
pub mod scanner;

pub use error::ExtractError;
pub use extract::{ExtractConfig, Extraction, extract};
