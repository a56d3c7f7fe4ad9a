use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document identifier. Signed so that callers can pass negative ids,
/// which ingestion rejects.
pub type DocId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    #[serde(alias = "active")]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Actual => "actual",
            DocumentStatus::Irrelevant => "irrelevant",
            DocumentStatus::Banned => "banned",
            DocumentStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DocumentStatus {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "actual" | "active" => Ok(DocumentStatus::Actual),
            "irrelevant" => Ok(DocumentStatus::Irrelevant),
            "banned" => Ok(DocumentStatus::Banned),
            "removed" => Ok(DocumentStatus::Removed),
            other => Err(SearchError::Validation(format!("unknown document status {other:?}"))),
        }
    }
}

/// A ranked search hit. Owns no reference into the index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self { Self { id, relevance, rating } }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ document_id = {}, relevance = {}, rating = {} }}", self.id, self.relevance, self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_document() {
        let doc = Document::new(3, 0.5, -1);
        assert_eq!(doc.to_string(), "{ document_id = 3, relevance = 0.5, rating = -1 }");
    }

    #[test]
    fn parses_status_names() {
        assert_eq!("ACTUAL".parse::<DocumentStatus>().unwrap(), DocumentStatus::Actual);
        assert_eq!("active".parse::<DocumentStatus>().unwrap(), DocumentStatus::Actual);
        assert_eq!("Banned".parse::<DocumentStatus>().unwrap(), DocumentStatus::Banned);
        assert!("deleted".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&DocumentStatus::Irrelevant).unwrap();
        assert_eq!(json, "\"irrelevant\"");
        let status: DocumentStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, DocumentStatus::Actual);
    }
}
