use crate::error::{Result, SearchError};
use std::collections::HashSet;

/// Split text into words on ASCII spaces. Runs of spaces collapse and no
/// empty words are produced; tabs and other whitespace stay inside words.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}

/// True if the word contains an ASCII control character (bytes 1..=31).
pub fn has_control_char(word: &str) -> bool {
    word.bytes().any(|b| b > 0 && b < b' ')
}

/// Immutable set of words ignored during indexing and querying.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from any collection of words. Empty strings are dropped;
    /// a word carrying a control character rejects the whole set.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() { continue; }
            if has_control_char(word) {
                return Err(SearchError::validation(format!("stop word {word:?} contains a control character")));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Build from a space-delimited string such as `"и в на"`.
    pub fn from_text(text: &str) -> Result<Self> { Self::new(split_into_words(text)) }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_spaces_only() {
        let words: Vec<&str> = split_into_words("  cat  in\tthe city ").collect();
        assert_eq!(words, vec!["cat", "in\tthe", "city"]);
    }

    #[test]
    fn blank_text_has_no_words() {
        assert_eq!(split_into_words("   ").count(), 0);
        assert_eq!(split_into_words("").count(), 0);
    }

    #[test]
    fn detects_control_chars() {
        assert!(has_control_char("ca\x12t"));
        assert!(has_control_char("\tcat"));
        assert!(!has_control_char("пушистый"));
        assert!(!has_control_char("-cat"));
    }

    #[test]
    fn stop_words_from_text() {
        let stop = StopWords::from_text("и в  на").unwrap();
        assert_eq!(stop.len(), 3);
        assert!(stop.contains("в"));
        assert!(!stop.contains("кот"));
    }

    #[test]
    fn stop_words_reject_control_chars() {
        let err = StopWords::new(["in", "th\x01e"]).unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[test]
    fn stop_words_skip_empty_entries() {
        let stop = StopWords::new(vec![String::new(), "the".to_string()]).unwrap();
        assert_eq!(stop.len(), 1);
    }
}
