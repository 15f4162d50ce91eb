//! Rolling log of search requests that counts the ones with no results.

use crate::config::MIN_IN_DAY;
use crate::engine::SearchEngine;
use crate::error::Result;
use crate::index::{DocId, Document, DocumentStatus};
use std::collections::VecDeque;

/// Outcomes of the last `MIN_IN_DAY` requests, one request per minute tick.
#[derive(Debug, Default, Clone)]
pub struct RequestWindow {
    requests: VecDeque<bool>,
    no_result_requests: usize,
}

impl RequestWindow {
    pub fn new() -> Self { Self::default() }

    /// Record one request; the oldest request falls out once the window is full.
    pub fn notify(&mut self, had_results: bool) {
        if self.requests.len() == MIN_IN_DAY {
            if let Some(false) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }
        self.requests.push_back(had_results);
        if !had_results {
            self.no_result_requests += 1;
        }
    }

    pub fn no_result_count(&self) -> usize {
        self.no_result_requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Forwards searches to a `SearchEngine` and records each outcome.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    window: RequestWindow,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        Self { engine, window: RequestWindow::new() }
    }

    /// Failed searches are not recorded.
    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let documents = self.engine.find_top_documents_with(raw_query, predicate)?;
        self.window.notify(!documents.is_empty());
        Ok(documents)
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, |_, document_status, _| document_status == status)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn get_no_result_requests(&self) -> usize {
        self.window.no_result_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_counts_empty_outcomes() {
        let mut window = RequestWindow::new();
        window.notify(false);
        window.notify(true);
        window.notify(false);
        assert_eq!(window.no_result_count(), 2);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn window_forgets_requests_older_than_a_day() {
        let mut window = RequestWindow::new();
        for _ in 0..MIN_IN_DAY - 1 {
            window.notify(false);
        }
        assert_eq!(window.no_result_count(), MIN_IN_DAY - 1);

        window.notify(true);
        assert_eq!(window.no_result_count(), MIN_IN_DAY - 1);
        window.notify(true);
        assert_eq!(window.no_result_count(), MIN_IN_DAY - 2);
        assert_eq!(window.len(), MIN_IN_DAY);
    }

    #[test]
    fn queue_records_search_outcomes() {
        let mut engine = SearchEngine::from_stop_words_text("and in at").unwrap();
        engine.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        engine.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        engine.add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8]).unwrap();

        let mut queue = RequestQueue::new(&engine);
        for _ in 0..MIN_IN_DAY - 1 {
            queue.add_find_request("empty request").unwrap();
        }
        queue.add_find_request("curly dog").unwrap();
        queue.add_find_request("big collar").unwrap();
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.get_no_result_requests(), MIN_IN_DAY - 2);
    }

    #[test]
    fn failed_searches_are_not_recorded() {
        let engine = SearchEngine::default();
        let mut queue = RequestQueue::new(&engine);
        assert!(queue.add_find_request("cat --dog").is_err());
        assert_eq!(queue.get_no_result_requests(), 0);
    }
}
