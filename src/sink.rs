// 💾 Sink - persist named documents under an output root
//
// Paths handed to a sink are relative, `/`-separated, and keyed by entity
// slug. `FileSink` writes to disk; `MemorySink` keeps everything in a map.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

use crate::projection::Projections;

pub const BUSINESS_SNAPSHOT: &str = "data/businesses.json";
pub const CITY_SNAPSHOT: &str = "data/cities.json";
pub const STATE_SNAPSHOT: &str = "data/states.json";
pub const CATEGORY_SNAPSHOT: &str = "data/categories.json";

/// Destination for generated documents
pub trait Sink {
    fn write(&self, relative_path: &str, bytes: &[u8]) -> Result<()>;
}

/// Reject absolute paths and any `..` component
fn validate_relative(relative_path: &str) -> Result<&Path> {
    let path = Path::new(relative_path);
    if relative_path.is_empty() {
        bail!("Empty output path");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => bail!("Output path escapes the output root: {:?}", relative_path),
        }
    }
    Ok(path)
}

// ============================================================================
// FILE SINK
// ============================================================================

pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        FileSink { root: root.into() }
    }
}

impl Sink for FileSink {
    fn write(&self, relative_path: &str, bytes: &[u8]) -> Result<()> {
        let target = self.root.join(validate_relative(relative_path)?);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        fs::write(&target, bytes).with_context(|| format!("Failed to write {:?}", target))?;

        trace!(path = %target.display(), bytes = bytes.len(), "Wrote document");
        Ok(())
    }
}

// ============================================================================
// MEMORY SINK
// ============================================================================

/// Collects documents in memory (dry runs and tests)
#[derive(Default)]
pub struct MemorySink {
    documents: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative_path: &str) -> Option<Vec<u8>> {
        self.documents.borrow().get(relative_path).cloned()
    }

    pub fn get_string(&self, relative_path: &str) -> Option<String> {
        self.get(relative_path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn paths(&self) -> Vec<String> {
        self.documents.borrow().keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.documents.borrow().len()
    }
}

impl Sink for MemorySink {
    fn write(&self, relative_path: &str, bytes: &[u8]) -> Result<()> {
        validate_relative(relative_path)?;
        self.documents
            .borrow_mut()
            .insert(relative_path.to_string(), bytes.to_vec());
        Ok(())
    }
}

// ============================================================================
// JSON SNAPSHOTS
// ============================================================================

fn write_json<T: Serialize + ?Sized>(sink: &dyn Sink, path: &str, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path))?;
    sink.write(path, &json)
}

/// Write each projection sequence as its own pretty JSON document
///
/// Returns the number of documents written.
pub fn write_snapshots(sink: &dyn Sink, projections: &Projections) -> Result<usize> {
    write_json(sink, BUSINESS_SNAPSHOT, &projections.businesses)?;
    write_json(sink, CITY_SNAPSHOT, &projections.cities)?;
    write_json(sink, STATE_SNAPSHOT, &projections.states)?;
    write_json(sink, CATEGORY_SNAPSHOT, &projections.categories)?;
    Ok(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProcessedCategory;

    #[test]
    fn test_validate_relative() {
        assert!(validate_relative("salon/glow-1/index.html").is_ok());
        assert!(validate_relative("../escape.html").is_err());
        assert!(validate_relative("/etc/passwd").is_err());
        assert!(validate_relative("").is_err());
    }

    #[test]
    fn test_file_sink_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());

        sink.write("city/springfield-il1/index.html", b"<html></html>").unwrap();

        let written = fs::read_to_string(dir.path().join("city/springfield-il1/index.html")).unwrap();
        assert_eq!(written, "<html></html>");
    }

    #[test]
    fn test_file_sink_rejects_escape() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("out"));
        assert!(sink.write("../outside.txt", b"x").is_err());
        assert!(!dir.path().join("outside.txt").exists());
    }

    #[test]
    fn test_memory_sink_overwrites() {
        let sink = MemorySink::new();
        sink.write("index.html", b"one").unwrap();
        sink.write("index.html", b"two").unwrap();

        assert_eq!(sink.count(), 1);
        assert_eq!(sink.get_string("index.html").as_deref(), Some("two"));
    }

    #[test]
    fn test_write_snapshots() {
        let sink = MemorySink::new();
        let projections = Projections {
            categories: vec![ProcessedCategory {
                id: "1".to_string(),
                category: "Hair Salon".to_string(),
                slug: "hair-salon".to_string(),
                salon_count: 3,
                business_ids: vec!["5".to_string()],
            }],
            ..Default::default()
        };

        assert_eq!(write_snapshots(&sink, &projections).unwrap(), 4);
        assert_eq!(
            sink.paths(),
            vec![BUSINESS_SNAPSHOT, CATEGORY_SNAPSHOT, CITY_SNAPSHOT, STATE_SNAPSHOT]
        );

        let categories: Vec<ProcessedCategory> =
            serde_json::from_slice(&sink.get(CATEGORY_SNAPSHOT).unwrap()).unwrap();
        assert_eq!(categories, projections.categories);
        assert_eq!(sink.get_string(BUSINESS_SNAPSHOT).as_deref(), Some("[]"));
    }
}
