//! Core data structures for docspace
//! 
//! This crate provides the data model shared by the layout, I/O and
//! visualization crates: document records, centroid-relative positions,
//! derived colors, dataset profiles and render instances.

pub mod point;
pub mod record;
pub mod color;
pub mod profile;
pub mod instance;
pub mod error;

pub use point::*;
pub use record::*;
pub use color::*;
pub use profile::*;
pub use instance::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, UnitQuaternion};
