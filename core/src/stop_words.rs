use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_words};
use std::collections::HashSet;

/// Immutable set of words excluded from indexing and from queries.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from a collection of words. Duplicates collapse and empty entries
    /// are discarded; any invalid word fails the whole construction.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidArgument(format!("stop word {word:?} is invalid")));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Build from a single space-separated string.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_words(text))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_and_drops_empty() {
        let stop = StopWords::new(["in", "", "the", "in"]).unwrap();
        assert_eq!(stop.len(), 2);
        assert!(stop.is_stop_word("in"));
        assert!(stop.is_stop_word("the"));
        assert!(!stop.is_stop_word(""));
        assert!(!stop.is_stop_word("cat"));
    }

    #[test]
    fn from_text_splits_on_spaces() {
        let stop = StopWords::from_text("  and in   on ").unwrap();
        assert_eq!(stop.len(), 3);
        assert!(stop.is_stop_word("on"));
    }

    #[test]
    fn rejects_control_characters() {
        let err = StopWords::new(["in", "th\u{2}e"]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert!(StopWords::from_text("a\u{1f}b c").is_err());
    }

    #[test]
    fn rejects_embedded_space() {
        assert!(StopWords::new(["two words"]).is_err());
    }
}
