use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::split_into_words;
use std::collections::BTreeSet;

/// Parsed query. A word never sits in both sets: minus wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    match token.strip_prefix('-') {
        Some(rest) if rest.is_empty() || rest.starts_with('-') => {
            Err(SearchError::InvalidArgument(format!("malformed minus word {token:?}")))
        }
        Some(rest) => Ok(QueryWord { data: rest, is_minus: true }),
        None => Ok(QueryWord { data: token, is_minus: false }),
    }
}

/// Parse a raw query into plus and minus words, dropping stop words.
pub fn parse_query(raw_query: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for token in split_into_words(raw_query)? {
        let word = parse_query_word(token)?;
        if stop_words.is_stop_word(word.data) {
            continue;
        }
        if word.is_minus {
            query.minus_words.insert(word.data.to_string());
        } else {
            query.plus_words.insert(word.data.to_string());
        }
    }
    let Query { plus_words, minus_words } = &mut query;
    plus_words.retain(|word| !minus_words.contains(word));
    Ok(query)
}
