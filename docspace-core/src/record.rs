//! Document records as they arrive from a dataset source

use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// One labeled document with its precomputed 3D embedding coordinate.
///
/// The wire format names the label `value`:
/// `{"id": 1, "value": "Rust", "x": 0.1, "y": 0.2, "z": 0.3}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: u64,
    #[serde(rename = "value")]
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl DocumentRecord {
    /// Create a new record
    pub fn new(id: u64, label: impl Into<String>, x: f32, y: f32, z: f32) -> Self {
        Self {
            id,
            label: label.into(),
            x,
            y,
            z,
        }
    }

    /// The raw embedding coordinate
    pub fn raw_position(&self) -> Point3f {
        Point3f::new(self.x, self.y, self.z)
    }

    /// Whether every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
