//! In-memory TF-IDF document index with plus/minus queries and top-K retrieval.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod request_queue;
pub mod stop_words;
pub mod tokenizer;

pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use index::{DocId, Document, DocumentStatus};
pub use request_queue::{RequestQueue, RequestWindow};
pub use stop_words::StopWords;
