use crate::error::{Result, SearchError};
use crate::tokenizer::{has_control_char, split_into_words, StopWords};
use std::collections::BTreeSet;

/// A parsed query: words that score documents and words that exclude them.
/// Both sets are free of stop words and disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool { self.plus_words.is_empty() && self.minus_words.is_empty() }
}

#[derive(Debug, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(token: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    if token == "-" {
        return Err(SearchError::validation("query contains a minus sign without a word"));
    }
    if token.starts_with("--") {
        return Err(SearchError::validation(format!("query word {token:?} starts with a double minus")));
    }
    if has_control_char(token) {
        return Err(SearchError::validation(format!("query word {token:?} contains a control character")));
    }
    let (data, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    Ok(QueryWord { data, is_minus, is_stop: stop_words.contains(data) })
}

/// Parse a raw query. A leading `-` marks a word as excluded; stop words are
/// dropped from both sets. A bare `-`, a leading `--`, a control character,
/// or a word that is both required and excluded rejects the whole query.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for token in split_into_words(text) {
        let word = parse_query_word(token, stop_words)?;
        if word.is_stop { continue; }
        if word.is_minus {
            query.minus_words.insert(word.data.to_string());
        } else {
            query.plus_words.insert(word.data.to_string());
        }
    }
    if let Some(word) = query.plus_words.intersection(&query.minus_words).next() {
        return Err(SearchError::validation(format!("query word {word:?} is both required and excluded")));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> StopWords { StopWords::from_text("in the").unwrap() }

    #[test]
    fn splits_plus_and_minus_words() {
        let q = parse_query("cat  -city town cat", &stop()).unwrap();
        assert_eq!(q.plus_words.iter().map(String::as_str).collect::<Vec<_>>(), vec!["cat", "town"]);
        assert_eq!(q.minus_words.iter().map(String::as_str).collect::<Vec<_>>(), vec!["city"]);
    }

    #[test]
    fn drops_stop_words_on_both_sides() {
        let q = parse_query("in -the cat", &stop()).unwrap();
        assert_eq!(q.plus_words.len(), 1);
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn rejects_broken_minus_syntax() {
        assert!(matches!(parse_query("cat -", &stop()), Err(SearchError::Validation(_))));
        assert!(matches!(parse_query("--cat", &stop()), Err(SearchError::Validation(_))));
        assert!(matches!(parse_query("cat ---dog", &stop()), Err(SearchError::Validation(_))));
    }

    #[test]
    fn rejects_control_chars() {
        assert!(parse_query("ca\x1ft", &stop()).is_err());
        assert!(parse_query("-do\x02g", &stop()).is_err());
    }

    #[test]
    fn rejects_word_both_required_and_excluded() {
        assert!(parse_query("cat -cat", &stop()).is_err());
    }

    #[test]
    fn minus_number_is_an_excluded_word() {
        let q = parse_query("cat -5", &stop()).unwrap();
        assert!(q.minus_words.contains("5"));
    }

    #[test]
    fn inner_minus_is_part_of_word() {
        let q = parse_query("well-known", &stop()).unwrap();
        assert!(q.plus_words.contains("well-known"));
    }

    #[test]
    fn empty_query() {
        assert!(parse_query("   ", &stop()).unwrap().is_empty());
    }
}
