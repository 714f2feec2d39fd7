//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A render-space position: `(raw - centroid) * scale_factor`
pub type NormalizedPosition = Point3f;

/// Arithmetic mean of every raw coordinate in a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Centroid {
    /// Create a centroid from its components
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The centroid of an empty dataset
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// View the centroid as a point
    pub fn as_point(&self) -> Point3f {
        Point3f::new(self.x, self.y, self.z)
    }
}

impl Default for Centroid {
    fn default() -> Self {
        Self::origin()
    }
}

impl From<Point3f> for Centroid {
    fn from(point: Point3f) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}
