//! Camera utilities for 3D visualization

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A perspective camera looking at the document cloud
///
/// Holds the lens and pose only; the renderer builds its view and projection
/// from these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Move along the current viewing direction so the target is `distance` away
    pub fn set_distance(&mut self, distance: f32) {
        let offset = self.position - self.target;
        let direction = if offset.norm_squared() > 0.0 {
            offset.normalize()
        } else {
            Vector3::z()
        };
        self.position = self.target + direction * distance;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            75f32.to_radians(),
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}

/// Allowed range of camera distance from the focal point.
///
/// Pointer controls read these bounds when zooming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitBounds {
    pub fn new(min_distance: f32, max_distance: f32) -> Self {
        Self { min_distance, max_distance }
    }

    /// Clamp a requested distance into the bounds
    pub fn clamp(&self, distance: f32) -> f32 {
        distance.max(self.min_distance).min(self.max_distance)
    }

    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.min_distance && distance <= self.max_distance
    }
}
