//! Camera and orbit settings keyed to dataset scale

use crate::camera::{Camera, OrbitBounds};
use docspace_core::DatasetProfile;
use nalgebra::{Point3, Vector3};

/// Camera and control settings for one dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfiguration {
    pub far_plane: f32,
    pub initial_distance: f32,
    pub orbit: OrbitBounds,
}

impl ViewConfiguration {
    /// Settings in effect before any dataset has loaded
    pub fn initial() -> Self {
        Self {
            far_plane: 10000.0,
            initial_distance: 8000.0,
            orbit: OrbitBounds::new(0.0, 8000.0),
        }
    }

    /// Apply to a camera and its orbit controls.
    ///
    /// The camera is reset to look at the origin from +Z.
    pub fn apply(&self, camera: &mut Camera, orbit: &mut OrbitBounds) {
        camera.far = self.far_plane;
        camera.target = Point3::origin();
        camera.up = Vector3::y();
        camera.position = Point3::new(0.0, 0.0, self.initial_distance);
        *orbit = self.orbit;
    }
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self::initial()
    }
}

/// Derive the view settings for a dataset profile
///
/// Negative minimum orbit distances are treated as zero. The camera starts
/// at the far plane distance, clamped into the orbit bounds.
pub fn configure_for(profile: &DatasetProfile) -> ViewConfiguration {
    let orbit = OrbitBounds::new(
        profile.min_orbit_distance.max(0.0),
        profile.max_orbit_distance,
    );
    ViewConfiguration {
        far_plane: profile.camera_far_plane,
        initial_distance: orbit.clamp(profile.camera_far_plane),
        orbit,
    }
}
