//! JSON-lines document store.
//!
//! Each `<collection>.jsonl` file under the root directory is one collection;
//! each non-blank line is one document. Files are opened per call and read
//! lazily, line by line.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use data_spi::{DataError, Document, DocumentStore, DocumentStream, Result};
use serde_json::Value;
use tracing::debug;

const EXTENSION: &str = "jsonl";

/// Directory of `.jsonl` collections.
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    root: PathBuf,
}

impl JsonLinesStore {
    /// Create a store rooted at `root`. The directory is only touched on use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        let invalid = collection.is_empty()
            || collection.starts_with('.')
            || collection.contains(['/', '\\'])
            || collection.contains("..");
        if invalid {
            return Err(DataError::InvalidCollection(collection.to_string()));
        }
        Ok(self.root.join(format!("{}.{}", collection, EXTENSION)))
    }
}

impl DocumentStore for JsonLinesStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn collections(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn stream(&self, collection: &str) -> Result<DocumentStream<'_>> {
        let path = self.collection_path(collection)?;
        if !path.is_file() {
            return Err(DataError::UnknownCollection(collection.to_string()));
        }
        debug!(path = %path.display(), "streaming collection");

        let reader = BufReader::new(File::open(&path)?);
        let collection = collection.to_string();
        Ok(Box::new(reader.lines().enumerate().filter_map(
            move |(i, line)| match line {
                Err(e) => Some(Err(DataError::from(e))),
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(parse_line(&collection, i + 1, &line)),
            },
        )))
    }
}

fn parse_line(collection: &str, line_no: usize, line: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| DataError::Parse(format!("{}:{}: {}", collection, line_no, e)))?;
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", collection, line_no));
    Document::from_value(id, value).ok_or_else(|| {
        DataError::Parse(format!(
            "{}:{}: expected a JSON object",
            collection, line_no
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_collection(dir: &Path, name: &str, lines: &[&str]) {
        let mut file = File::create(dir.join(format!("{}.jsonl", name))).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn test_stream_documents() {
        let dir = tempdir().unwrap();
        write_collection(
            dir.path(),
            "inventory",
            &[r#"{"id": "a", "sales": 1}"#, "", r#"{"sales": 2}"#],
        );

        let store = JsonLinesStore::new(dir.path());
        let docs: Vec<Document> = store
            .stream("inventory")
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[1].id, "inventory:3");
    }

    #[test]
    fn test_bad_line_is_reported_with_position() {
        let dir = tempdir().unwrap();
        write_collection(dir.path(), "c", &[r#"{"v": 1}"#, "[1, 2]", "{oops"]);

        let store = JsonLinesStore::new(dir.path());
        let results: Vec<Result<Document>> = store.stream("c").unwrap().collect();

        assert!(results[0].is_ok());
        assert!(matches!(&results[1], Err(DataError::Parse(m)) if m.starts_with("c:2:")));
        assert!(matches!(&results[2], Err(DataError::Parse(m)) if m.starts_with("c:3:")));
    }

    #[test]
    fn test_collections_listing() {
        let dir = tempdir().unwrap();
        write_collection(dir.path(), "userrequests", &[]);
        write_collection(dir.path(), "inventory", &[]);
        File::create(dir.path().join("notes.txt")).unwrap();

        let store = JsonLinesStore::new(dir.path());
        assert_eq!(store.collections().unwrap(), vec!["inventory", "userrequests"]);
    }

    #[test]
    fn test_unknown_collection() {
        let dir = tempdir().unwrap();
        let store = JsonLinesStore::new(dir.path());
        assert!(matches!(
            store.stream("nothing"),
            Err(DataError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_path_traversal_rejected() {
        let store = JsonLinesStore::new("/tmp");
        for name in ["../etc/passwd", "a/b", ".hidden", "", "x\\y"] {
            assert!(
                matches!(store.stream(name), Err(DataError::InvalidCollection(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let store = JsonLinesStore::new("/definitely/not/here");
        assert!(matches!(store.collections(), Err(DataError::Io(_))));
    }
}
