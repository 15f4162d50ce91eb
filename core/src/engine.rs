//! Document store plus TF-IDF relevance engine.
//!
//! `SearchEngine` owns the stop words, per-document metadata, the live id list
//! and the inverted index. Mutations go through `add_document` and
//! `remove_document` only, so the store and both index directions never drift.

use crate::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use crate::error::{Result, SearchError};
use crate::index::{DocId, Document, DocumentData, DocumentStatus, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::stop_words::StopWords;
use crate::tokenizer::split_into_words;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct SearchEngine {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: HashMap<DocId, DocumentData>,
    // live ids in insertion order
    document_ids: Vec<DocId>,
}

impl SearchEngine {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(StopWords::new(stop_words)?))
    }

    pub fn from_stop_words_text(stop_words_text: &str) -> Result<Self> {
        Ok(Self::new(StopWords::from_text(stop_words_text)?))
    }

    /// Index a document. Every check runs before anything is written.
    pub fn add_document(
        &mut self,
        document_id: DocId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::InvalidArgument(format!("document id {document_id} is negative")));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::InvalidArgument(format!("document id {document_id} already exists")));
        }
        let words = self.split_into_words_no_stop(document)?;

        self.index.insert(document_id, &words);
        self.documents.insert(
            document_id,
            DocumentData { rating: compute_average_rating(ratings), status },
        );
        self.document_ids.push(document_id);
        Ok(())
    }

    /// Remove a live document. Unknown ids are ignored.
    pub fn remove_document(&mut self, document_id: DocId) {
        if self.documents.remove(&document_id).is_none() {
            return;
        }
        self.index.remove(document_id);
        self.document_ids.retain(|&id| id != document_id);
    }

    pub fn get_word_frequencies(&self, document_id: DocId) -> Result<&BTreeMap<String, f64>> {
        self.index
            .word_frequencies(document_id)
            .ok_or(SearchError::NotFound(document_id))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live document ids in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DocId> {
        self.document_ids.iter()
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        parse_query(raw_query, &self.stop_words)
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, |_, document_status, _| document_status == status)
    }

    /// Rank documents accepted by `predicate(id, status, rating)` and keep the best
    /// `MAX_RESULT_DOCUMENT_COUNT`.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let mut matched_documents = self.find_all_documents(&query, predicate);
        rank_documents(&mut matched_documents);
        matched_documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched_documents)
    }

    /// Plus-words of the query found in the document, sorted, or nothing when a
    /// minus-word is present.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let data = self
            .documents
            .get(&document_id)
            .ok_or(SearchError::NotFound(document_id))?;
        let query = self.parse_query(raw_query)?;
        let word_freqs = self.get_word_frequencies(document_id)?;

        if query.minus_words.iter().any(|word| word_freqs.contains_key(word)) {
            return Ok((Vec::new(), data.status));
        }
        let matched_words = query
            .plus_words
            .into_iter()
            .filter(|word| word_freqs.contains_key(word))
            .collect();
        Ok((matched_words, data.status))
    }

    /// ln(live documents / documents containing the word); zero for unknown words.
    pub fn inverse_document_freq(&self, word: &str) -> f64 {
        match self.index.postings(word) {
            Some(postings) if !postings.is_empty() => {
                (self.document_count() as f64 / postings.len() as f64).ln()
            }
            _ => 0.0,
        }
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        Ok(split_into_words(text)?
            .into_iter()
            .filter(|word| !self.stop_words.is_stop_word(word))
            .collect())
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.inverse_document_freq(word);
            for (&document_id, &term_freq) in postings {
                let data = &self.documents[&document_id];
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for word in &query.minus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            for document_id in postings.keys() {
                document_to_relevance.remove(document_id);
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(id, relevance)| Document { id, relevance, rating: self.documents[&id].rating })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchEngine {
    type Item = &'a DocId;
    type IntoIter = std::slice::Iter<'a, DocId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Truncating mean, zero for no ratings.
fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}

/// Sort by relevance descending. Runs of documents within `RELEVANCE_EPSILON` of
/// the run's leader are ordered by rating descending instead.
fn rank_documents(documents: &mut [Document]) {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let mut start = 0;
    while start < documents.len() {
        let leader = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|doc| leader - doc.relevance >= RELEVANCE_EPSILON)
            .map_or(documents.len(), |offset| start + offset);
        documents[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        start = end;
    }
}
