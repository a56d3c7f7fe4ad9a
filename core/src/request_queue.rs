use crate::document::{DocId, Document, DocumentStatus};
use crate::error::Result;
use crate::search::SearchServer;
use std::collections::VecDeque;

/// Number of requests remembered: one per minute of a day.
pub const REQUEST_WINDOW: usize = 1440;

/// Hit counts of the most recent [`REQUEST_WINDOW`] find requests.
#[derive(Debug, Clone, Default)]
pub struct RequestStats {
    hits: VecDeque<usize>,
    no_result: usize,
}

impl RequestStats {
    pub fn new() -> Self { Self::default() }

    pub fn record(&mut self, hits: usize) {
        if self.hits.len() == REQUEST_WINDOW {
            if let Some(0) = self.hits.pop_front() {
                self.no_result -= 1;
            }
        }
        if hits == 0 {
            self.no_result += 1;
        }
        self.hits.push_back(hits);
    }

    /// Requests in the window that returned nothing.
    pub fn no_result_requests(&self) -> usize { self.no_result }

    pub fn len(&self) -> usize { self.hits.len() }

    pub fn is_empty(&self) -> bool { self.hits.is_empty() }
}

/// Runs find requests against a server and tracks how many came back empty.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    stats: RequestStats,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self { Self { server, stats: RequestStats::new() } }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let docs = self.server.find_top_documents(raw_query)?;
        Ok(self.recorded(docs))
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        let docs = self.server.find_top_documents_by_status(raw_query, status)?;
        Ok(self.recorded(docs))
    }

    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let docs = self.server.find_top_documents_with(raw_query, predicate)?;
        Ok(self.recorded(docs))
    }

    pub fn no_result_requests(&self) -> usize { self.stats.no_result_requests() }

    pub fn stats(&self) -> &RequestStats { &self.stats }

    fn recorded(&mut self, docs: Vec<Document>) -> Vec<Document> {
        self.stats.record(docs.len());
        docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_forgets_old_requests() {
        let mut stats = RequestStats::new();
        for _ in 0..REQUEST_WINDOW - 1 {
            stats.record(0);
        }
        stats.record(3);
        assert_eq!(stats.no_result_requests(), REQUEST_WINDOW - 1);
        stats.record(1);
        stats.record(0);
        assert_eq!(stats.len(), REQUEST_WINDOW);
        assert_eq!(stats.no_result_requests(), REQUEST_WINDOW - 2);
    }

    #[test]
    fn queue_counts_empty_results() {
        let mut server = SearchServer::with_stop_words("and in at").unwrap();
        server.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();

        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("empty request").unwrap().is_empty());
        assert_eq!(queue.add_find_request("curly dog").unwrap().len(), 2);
        assert!(queue.add_find_request_by_status("curly", DocumentStatus::Banned).unwrap().is_empty());
        assert_eq!(queue.add_find_request_with("curly", |id, _, _| id == 2).unwrap().len(), 1);
        assert_eq!(queue.no_result_requests(), 2);
    }

    #[test]
    fn invalid_query_is_not_recorded() {
        let server = SearchServer::default();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("cat --dog").is_err());
        assert!(queue.stats().is_empty());
    }
}
