use thiserror::Error;

use crate::fetch::error::FetchError;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Yaml requires a `strategy` block")]
    MissingBlock,

    #[error("Two arguments found in `strategy` block but no regex provided.")]
    Arity,

    #[error("Return value of a `strategy` block must be a string, an array of strings, or nil.")]
    InvalidReturnType,

    #[error("Invalid key path: {0}")]
    InvalidKeyPath(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
