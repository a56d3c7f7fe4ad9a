use crate::document::{DocId, DocumentStatus};
use crate::error::{Result, SearchError};
use std::collections::{BTreeMap, HashMap};

/// Term frequencies of one term, keyed by document id in ascending order.
pub type Postings = BTreeMap<DocId, f64>;

/// Term -> (doc id -> term frequency). Append-only: a posting is written
/// once, when its document is ingested.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn postings(&self, term: &str) -> Option<&Postings> { self.postings.get(term) }

    /// Number of documents containing the term.
    pub fn document_freq(&self, term: &str) -> usize { self.postings.get(term).map_or(0, BTreeMap::len) }

    pub fn contains(&self, term: &str, doc_id: DocId) -> bool {
        self.postings.get(term).is_some_and(|p| p.contains_key(&doc_id))
    }

    pub fn term_count(&self) -> usize { self.postings.len() }

    /// Each occurrence of a word adds `1 / words.len()` to its posting for the
    /// document. An empty word list adds nothing.
    pub(crate) fn insert_document(&mut self, doc_id: DocId, words: &[&str]) {
        if words.is_empty() { return; }
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            *self.postings.entry((*word).to_string()).or_default().entry(doc_id).or_insert(0.0) += inv_word_count;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Per-document metadata plus the order in which documents were added.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, DocumentData>,
    id_by_order: Vec<DocId>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, doc_id: DocId) -> Option<&DocumentData> { self.documents.get(&doc_id) }

    pub fn contains(&self, doc_id: DocId) -> bool { self.documents.contains_key(&doc_id) }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Id of the document added at position `index` (0-based).
    pub fn id_at(&self, index: usize) -> Result<DocId> {
        self.id_by_order
            .get(index)
            .copied()
            .ok_or(SearchError::IndexOutOfRange { index, len: self.id_by_order.len() })
    }

    pub(crate) fn insert(&mut self, doc_id: DocId, data: DocumentData) {
        self.documents.insert(doc_id, data);
        self.id_by_order.push(doc_id);
    }
}

/// Truncating integer mean; 0 for no ratings.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() { return 0; }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
