//! In-memory full-text search: an inverted index with per-document term
//! frequencies, TF-IDF ranking, plus/minus query words, stop words and
//! caller-supplied document filters.

pub mod corpus;
pub mod document;
pub mod error;
pub mod index;
pub mod paginate;
pub mod query;
pub mod request_queue;
pub mod search;
pub mod tokenizer;

pub use corpus::{read_documents, InputDoc};
pub use document::{DocId, Document, DocumentStatus};
pub use error::{Result, SearchError};
pub use index::{DocumentData, DocumentStore, InvertedIndex, Postings};
pub use paginate::{paginate, Page, Paginator};
pub use query::{parse_query, Query};
pub use request_queue::{RequestQueue, RequestStats, REQUEST_WINDOW};
pub use search::{SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use tokenizer::{split_into_words, StopWords};
