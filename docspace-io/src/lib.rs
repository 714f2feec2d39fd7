//! Dataset I/O for docspace
//! 
//! This crate decodes the JSON document datasets consumed by the layout
//! pipeline and provides the sources the streamer fetches them from.

pub mod json;
pub mod source;
pub mod error;

pub use error::*;
pub use json::{parse_dataset, read_dataset, write_dataset};
pub use source::{DatasetSource, FileDatasetSource, MemoryDatasetSource};
