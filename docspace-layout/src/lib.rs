//! # docspace layout
//!
//! Pure transforms from raw embedding coordinates to render instructions.
//!
//! This crate provides centroid-relative coordinate normalization and a
//! deterministic mapping from a normalized position to a display color.
//! Both are referentially transparent and safe to recompute every frame.

pub mod normalize;
pub mod color_map;

// Re-export commonly used items
pub use normalize::*;
pub use color_map::*;
