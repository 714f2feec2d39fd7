//! JSON dataset format
//!
//! A dataset is a JSON array of `{id, value, x, y, z}` objects.

use crate::error::IoError;
use docspace_core::{DocumentRecord, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Decode a dataset from JSON bytes
///
/// Document ids must be unique within a dataset.
///
/// # Example
/// ```rust
/// use docspace_io::parse_dataset;
///
/// let json = br#"[{"id": 1, "value": "A", "x": 0.0, "y": 0.0, "z": 0.0}]"#;
/// let records = parse_dataset(json).unwrap();
/// assert_eq!(records[0].label, "A");
/// ```
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<DocumentRecord>> {
    let records: Vec<DocumentRecord> = serde_json::from_slice(bytes).map_err(IoError::from)?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id) {
            return Err(IoError::DuplicateId { id: record.id }.into());
        }
    }

    Ok(records)
}

/// Read a dataset file from disk
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<DocumentRecord>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => IoError::Io(e),
    })?;
    parse_dataset(&bytes)
}

/// Write a dataset file to disk
pub fn write_dataset<P: AsRef<Path>>(records: &[DocumentRecord], path: P) -> Result<()> {
    let json = serde_json::to_vec_pretty(records).map_err(IoError::from)?;
    fs::write(path, json)?;
    Ok(())
}
