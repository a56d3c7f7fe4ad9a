use crate::input::{read_line, read_line_with_number, read_ratings};
use anyhow::Result;
use search_core::{paginate, DocumentStatus, RequestQueue, SearchServer};
use std::io::{BufRead, Write};

/// Read stop words, a document count, that many text/ratings line pairs, then
/// answer one query per remaining line. Returns the number of queries that
/// found nothing.
pub fn run<R: BufRead, W: Write>(reader: &mut R, out: &mut W, page_size: usize) -> Result<usize> {
    let stop_words = read_line(reader)?.unwrap_or_default();
    let mut server = SearchServer::with_stop_words(&stop_words)?;

    let count = read_line_with_number(reader)?;
    for id in 0..count {
        let text = read_line(reader)?.unwrap_or_default();
        let ratings = read_ratings(reader)?;
        if let Err(err) = server.add_document(id, &text, DocumentStatus::Actual, &ratings) {
            tracing::warn!(doc_id = id, %err, "skipping document");
        }
    }

    let mut queue = RequestQueue::new(&server);
    while let Some(query) = read_line(reader)? {
        if query.trim().is_empty() { continue; }
        match queue.add_find_request(&query) {
            Ok(docs) => {
                writeln!(out, "Results for {query:?}:")?;
                for page in &paginate(&docs, page_size)? {
                    writeln!(out, "{page}")?;
                    writeln!(out, "Page break")?;
                }
            }
            Err(err) => {
                tracing::warn!(query = query.as_str(), %err, "rejected query");
                writeln!(out, "Error in query {query:?}: {err}")?;
            }
        }
    }

    let no_result = queue.no_result_requests();
    writeln!(out, "Total empty requests: {no_result}")?;
    Ok(no_result)
}
