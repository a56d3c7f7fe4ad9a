use crate::document::{DocId, DocumentStatus};
use crate::search::SearchServer;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document as read from JSON input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// JSON and JSONL files under `path` (or `path` itself), sorted by name.
pub fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        bail!("input path {} does not exist", path.display());
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", path.display()))?;
        let p = entry.into_path();
        if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
            files.push(p);
        }
    }
    Ok(files)
}

/// Read documents from a JSON file (one object or an array), a JSONL file, or
/// a directory of such files.
pub fn read_documents<P: AsRef<Path>>(path: P) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in collect_files(path.as_ref())? {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc = serde_json::from_str(&line).with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.into_iter().enumerate() {
                docs.push(serde_json::from_value(v).with_context(|| format!("{}[{i}]", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            docs.push(serde_json::from_value(json).with_context(|| format!("parsing {}", file.display()))?)
        }
        _ => bail!("{}: expected a document object or array", file.display()),
    }
    Ok(())
}

/// Add every document to the server. Rejected documents are logged and
/// skipped; returns how many were added.
pub fn ingest<I>(server: &mut SearchServer, docs: I) -> usize
where
    I: IntoIterator<Item = InputDoc>,
{
    let mut added = 0;
    for doc in docs {
        match server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            Ok(()) => added += 1,
            Err(err) => tracing::warn!(doc_id = doc.id, %err, "skipping document"),
        }
    }
    tracing::info!(added, total = server.document_count(), "ingested documents");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_json_and_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"id": 1, "text": "cat in the town", "ratings": [1, 2]}]"#).unwrap();
        fs::write(
            dir.path().join("b.jsonl"),
            "{\"id\": 2, \"text\": \"dog\", \"status\": \"banned\"}\n\n{\"id\": 3, \"text\": \"bird\"}\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = read_documents(dir.path()).unwrap();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(docs[0].ratings, vec![1, 2]);
        assert_eq!(docs[1].status, DocumentStatus::Banned);
        assert_eq!(docs[2].status, DocumentStatus::Actual);
        assert!(docs[2].ratings.is_empty());
    }

    #[test]
    fn reports_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.jsonl");
        fs::write(&file, "{\"id\": 1}\n").unwrap();
        assert!(read_documents(&file).is_err());
    }

    #[test]
    fn rejects_scalar_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("docs.json");
        fs::write(&file, "42").unwrap();
        let err = read_documents(&file).unwrap_err();
        assert!(err.to_string().contains("docs.json"), "{err:#}");
    }

    #[test]
    fn bad_array_element_names_file_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("docs.json");
        fs::write(&file, r#"[{"id": 1, "text": "cat"}, {"id": 2}]"#).unwrap();
        let err = read_documents(&file).unwrap_err();
        assert!(err.to_string().ends_with("docs.json[1]"), "{err:#}");
        assert!(format!("{err:#}").contains("missing field `text`"));
    }

    #[test]
    fn missing_input_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        assert!(read_documents(&missing).is_err());
        assert!(collect_files(&missing).is_err());
    }

    #[test]
    fn ingest_skips_rejected_documents() {
        let docs = vec![
            InputDoc { id: 1, text: "cat".into(), status: DocumentStatus::Actual, ratings: vec![] },
            InputDoc { id: 1, text: "dog".into(), status: DocumentStatus::Actual, ratings: vec![] },
            InputDoc { id: -4, text: "bird".into(), status: DocumentStatus::Actual, ratings: vec![] },
        ];
        let mut server = SearchServer::default();
        assert_eq!(ingest(&mut server, docs), 1);
        assert_eq!(server.document_count(), 1);
    }
}
