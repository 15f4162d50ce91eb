use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[^ ]+").expect("valid regex");
    // control characters plus the separator itself
    static ref INVALID_RE: Regex = Regex::new(r"[\x00-\x20]").expect("valid regex");
}

/// A token contained a character below U+0020.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("word {word:?} contains invalid characters")]
pub struct InvalidWordError {
    pub word: String,
}

/// A word is valid when it holds no control characters and no spaces.
pub fn is_valid_word(word: &str) -> bool {
    !INVALID_RE.is_match(word)
}

/// Split on runs of spaces without validating the resulting tokens.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(text).map(|mat| mat.as_str())
}

/// Split text into space-delimited tokens, in order. Fails on the first token
/// carrying a control character.
pub fn split_into_words(text: &str) -> Result<Vec<&str>, InvalidWordError> {
    split_words(text)
        .map(|word| {
            if is_valid_word(word) {
                Ok(word)
            } else {
                Err(InvalidWordError { word: word.to_string() })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_space_runs() {
        let words = split_into_words("  white   cat and  fancy collar ").unwrap();
        assert_eq!(words, vec!["white", "cat", "and", "fancy", "collar"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(split_into_words("").unwrap().is_empty());
        assert!(split_into_words("    ").unwrap().is_empty());
    }

    #[test]
    fn rejects_control_characters() {
        let err = split_into_words("good bad\u{12}word").unwrap_err();
        assert_eq!(err.word, "bad\u{12}word");
        assert!(split_into_words("tab\tseparated").is_err());
    }

    #[test]
    fn validity_rule() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("-dog"));
        assert!(is_valid_word("кот"));
        assert!(!is_valid_word("ca\u{1}t"));
        assert!(!is_valid_word("two words"));
    }
}
