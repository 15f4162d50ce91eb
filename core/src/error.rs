//! Error types returned by the index.

use crate::index::DocId;
use crate::tokenizer::InvalidWordError;
use thiserror::Error;

/// Errors produced by index operations. All of them leave the index unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Malformed stop word, query syntax, document id or document text
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The document id is not live
    #[error("Document {0} not found")]
    NotFound(DocId),
}

impl From<InvalidWordError> for SearchError {
    fn from(err: InvalidWordError) -> Self {
        SearchError::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
