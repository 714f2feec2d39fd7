//! Render instances committed to the scene

use crate::color::DerivedColor;
use crate::point::NormalizedPosition;
use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying which load request produced a piece of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation following this one
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A labeled point placed in the scene.
///
/// After commit only `orientation` and `visible` change; the position and
/// color are fixed for the lifetime of the instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstance {
    pub id: u64,
    pub label: String,
    pub position: NormalizedPosition,
    pub color: DerivedColor,
    /// Orientation relative to the rotating point group
    pub orientation: UnitQuaternion<f32>,
    /// Whether the label is within detail distance of the camera
    pub visible: bool,
}

impl RenderInstance {
    /// Create an instance with identity orientation
    pub fn new(id: u64, label: impl Into<String>, position: NormalizedPosition, color: DerivedColor) -> Self {
        Self {
            id,
            label: label.into(),
            position,
            color,
            orientation: UnitQuaternion::identity(),
            visible: true,
        }
    }
}
