//! Dataset sources
//!
//! A source resolves a profile's `source_id` into the complete record list.
//! Fetch and parse failures surface as `Error::Fetch`.

use crate::json::parse_dataset;
use docspace_core::{DocumentRecord, Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Trait for fetching complete datasets
#[allow(async_fn_in_trait)]
pub trait DatasetSource {
    /// Fetch every record of the dataset named `source_id`
    async fn fetch(&self, source_id: &str) -> Result<Vec<DocumentRecord>>;
}

/// Reads `<root>/<source_id>` as a JSON dataset
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    root: PathBuf,
}

impl FileDatasetSource {
    /// Create a source rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path a source id resolves to
    pub fn resolve(&self, source_id: &str) -> PathBuf {
        self.root.join(source_id)
    }
}

impl DatasetSource for FileDatasetSource {
    async fn fetch(&self, source_id: &str) -> Result<Vec<DocumentRecord>> {
        let path = self.resolve(source_id);
        tracing::debug!(path = %path.display(), "reading dataset");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::fetch(source_id, format!("{}: {}", path.display(), e)))?;
        parse_dataset(&bytes).map_err(|e| Error::fetch(source_id, e.to_string()))
    }
}

/// Serves datasets held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDatasetSource {
    datasets: HashMap<String, Vec<DocumentRecord>>,
}

impl MemoryDatasetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset under a source id, replacing any previous one
    pub fn insert(&mut self, source_id: impl Into<String>, records: Vec<DocumentRecord>) {
        self.datasets.insert(source_id.into(), records);
    }

    /// Builder-style variant of [`MemoryDatasetSource::insert`]
    pub fn with_dataset(mut self, source_id: impl Into<String>, records: Vec<DocumentRecord>) -> Self {
        self.insert(source_id, records);
        self
    }
}

impl DatasetSource for MemoryDatasetSource {
    async fn fetch(&self, source_id: &str) -> Result<Vec<DocumentRecord>> {
        self.datasets
            .get(source_id)
            .cloned()
            .ok_or_else(|| Error::fetch(source_id, "no such dataset"))
    }
}
