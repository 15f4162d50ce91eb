use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Caller-assigned document identifier. Negative values are rejected at ingestion.
pub type DocId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Actual => "actual",
            DocumentStatus::Irrelevant => "irrelevant",
            DocumentStatus::Banned => "banned",
            DocumentStatus::Removed => "removed",
        };
        f.write_str(name)
    }
}

impl FromStr for DocumentStatus {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "actual" => Ok(DocumentStatus::Actual),
            "irrelevant" => Ok(DocumentStatus::Irrelevant),
            "banned" => Ok(DocumentStatus::Banned),
            "removed" => Ok(DocumentStatus::Removed),
            other => Err(SearchError::InvalidArgument(format!("unknown document status {other:?}"))),
        }
    }
}

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

/// Per-document metadata kept by the store.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Word → document → term frequency, mirrored by document → word → term frequency.
///
/// Both directions are only ever touched through `insert` and `remove`, which
/// keep every (word, document, frequency) triple present in both maps.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: HashMap<String, BTreeMap<DocId, f64>>,
    document_to_word_freqs: HashMap<DocId, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index a document's non-stop words. An empty word list still creates an
    /// (empty) forward entry.
    pub(crate) fn insert(&mut self, document_id: DocId, words: &[&str]) {
        let freqs = term_frequencies(words);
        for (word, tf) in freqs.iter() {
            self.word_to_document_freqs
                .entry(word.clone())
                .or_default()
                .insert(document_id, *tf);
        }
        self.document_to_word_freqs.insert(document_id, freqs);
    }

    /// Drop every posting of a document; words left without documents disappear.
    pub(crate) fn remove(&mut self, document_id: DocId) {
        let Some(freqs) = self.document_to_word_freqs.remove(&document_id) else {
            return;
        };
        for word in freqs.keys() {
            if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                postings.remove(&document_id);
                if postings.is_empty() {
                    self.word_to_document_freqs.remove(word);
                }
            }
        }
    }

    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_document_freqs.get(word)
    }

    pub fn word_frequencies(&self, document_id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.document_to_word_freqs.get(&document_id)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.word_to_document_freqs.contains_key(word)
    }

    pub fn num_words(&self) -> usize {
        self.word_to_document_freqs.len()
    }
}

/// Share of each distinct word among all given words.
fn term_frequencies(words: &[&str]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for word in words {
        *counts.entry((*word).to_string()).or_insert(0) += 1;
    }
    let total = words.len() as f64;
    counts
        .into_iter()
        .map(|(word, count)| (word, count as f64 / total))
        .collect()
}
