//! Compile-time tuning constants for ranking and request accounting.

/// Maximum number of documents returned by a single search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Size of the rolling request window: one request per minute of a day.
pub const MIN_IN_DAY: usize = 1440;
