use crate::document::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors returned by the search engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Malformed input: control characters in stop words, document text or
    /// query words, or broken minus syntax in a query.
    #[error("invalid content: {0}")]
    Validation(String),
    /// Negative or already-used document id.
    #[error("invalid or duplicate document id: {0}")]
    DuplicateId(DocId),
    #[error("document index {index} out of range (document count {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown document id: {0}")]
    UnknownDocument(DocId),
}

impl SearchError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        SearchError::Validation(msg.into())
    }
}
