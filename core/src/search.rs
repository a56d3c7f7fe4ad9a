use crate::document::{DocId, Document, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::{compute_average_rating, DocumentData, DocumentStore, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::tokenizer::{has_control_char, split_into_words, StopWords};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Maximum number of documents returned by a find request.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// In-memory TF-IDF search engine. Owns the inverted index and the document
/// store; `add_document` is the only way to change either.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, index: InvertedIndex::new(), documents: DocumentStore::new() }
    }

    /// Build from a space-delimited stop word string.
    pub fn with_stop_words(text: &str) -> Result<Self> { Ok(Self::new(StopWords::from_text(text)?)) }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Id of the document added at position `index`.
    pub fn document_id(&self, index: usize) -> Result<DocId> { self.documents.id_at(index) }

    /// Index a document. All checks run before anything is written, so a
    /// rejected document leaves no trace.
    pub fn add_document(&mut self, doc_id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if doc_id < 0 || self.documents.contains(doc_id) {
            return Err(SearchError::DuplicateId(doc_id));
        }
        let words = self.split_into_words_no_stop(text)?;
        self.index.insert_document(doc_id, &words);
        let rating = compute_average_rating(ratings);
        self.documents.insert(doc_id, DocumentData { rating, status });
        debug!(doc_id, words = words.len(), rating, %status, "document added");
        Ok(())
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, |_, doc_status, _| doc_status == status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`, at most
    /// [`MAX_RESULT_DOCUMENT_COUNT`], best first.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(&query, predicate);
        let hits = matched.len();
        sort_by_relevance(&mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        debug!(query = raw_query, hits, returned = matched.len(), "find top documents");
        Ok(matched)
    }

    /// Required words of the query found in the document, or none at all if
    /// the document contains an excluded word.
    pub fn match_document(&self, raw_query: &str, doc_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self.documents.get(doc_id).ok_or(SearchError::UnknownDocument(doc_id))?.status;
        let query = parse_query(raw_query, &self.stop_words)?;
        if query.minus_words.iter().any(|w| self.index.contains(w, doc_id)) {
            return Ok((Vec::new(), status));
        }
        let words = query.plus_words.into_iter().filter(|w| self.index.contains(w, doc_id)).collect();
        Ok((words, status))
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if has_control_char(word) {
                return Err(SearchError::validation(format!("document word {word:?} contains a control character")));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    // The term must be present in the index.
    fn inverse_document_freq(&self, term: &str) -> f64 {
        (self.documents.len() as f64 / self.index.document_freq(term) as f64).ln()
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else { continue };
            let idf = self.inverse_document_freq(word);
            for (&doc_id, &tf) in postings {
                let Some(data) = self.documents.get(doc_id) else { continue };
                if predicate(doc_id, data.status, data.rating) {
                    *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
                }
            }
        }

        let excluded: BTreeSet<DocId> = query
            .minus_words
            .iter()
            .filter_map(|w| self.index.postings(w))
            .flat_map(|p| p.keys().copied())
            .collect();
        relevance.retain(|doc_id, _| !excluded.contains(doc_id));

        relevance
            .into_iter()
            .filter_map(|(doc_id, rel)| self.documents.get(doc_id).map(|d| Document::new(doc_id, rel, d.rating)))
            .collect()
    }
}

/// Order by descending relevance; a run of relevances within
/// [`RELEVANCE_EPSILON`] of the run's leader is ordered by descending rating.
/// Both sorts are stable, so full ties keep their incoming order.
fn sort_by_relevance(docs: &mut [Document]) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    let mut start = 0;
    while start < docs.len() {
        let leader = docs[start].relevance;
        let end = docs[start..]
            .iter()
            .position(|d| leader - d.relevance >= RELEVANCE_EPSILON)
            .map_or(docs.len(), |offset| start + offset);
        docs[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        start = end;
    }
}
