//! Per-dataset scale and view profiles

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one dataset size tier.
///
/// A dataset with a larger spatial spread needs a larger scale factor,
/// a farther clipping plane and wider orbit bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Tier name, e.g. `small` or `large`
    pub name: String,
    /// Identifier handed to the dataset source
    pub source_id: String,
    pub scale_factor: f32,
    pub min_orbit_distance: f32,
    pub max_orbit_distance: f32,
    pub camera_far_plane: f32,
}

impl DatasetProfile {
    pub const SMALL: &'static str = "small";
    pub const LARGE: &'static str = "large";

    /// Profile for the ~1K document dataset
    pub fn small() -> Self {
        Self {
            name: Self::SMALL.to_string(),
            source_id: "data/1k.json".to_string(),
            scale_factor: 5000.0,
            min_orbit_distance: -1000.0,
            max_orbit_distance: 30000.0,
            camera_far_plane: 300000.0,
        }
    }

    /// Profile for the ~10K document dataset
    pub fn large() -> Self {
        Self {
            name: Self::LARGE.to_string(),
            source_id: "data/10k.json".to_string(),
            scale_factor: 18000.0,
            min_orbit_distance: -15000.0,
            max_orbit_distance: 120000.0,
            camera_far_plane: 1000000.0,
        }
    }

    /// Check that the profile describes a usable view
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.scale_factor,
            self.min_orbit_distance,
            self.max_orbit_distance,
            self.camera_far_plane,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::Config(format!("profile '{}' has non-finite values", self.name)));
        }
        if self.scale_factor <= 0.0 {
            return Err(Error::Config(format!(
                "profile '{}' scale factor must be positive, got {}",
                self.name, self.scale_factor
            )));
        }
        if self.camera_far_plane <= 0.0 {
            return Err(Error::Config(format!(
                "profile '{}' far plane must be positive, got {}",
                self.name, self.camera_far_plane
            )));
        }
        if self.max_orbit_distance <= 0.0 || self.max_orbit_distance <= self.min_orbit_distance {
            return Err(Error::Config(format!(
                "profile '{}' orbit bounds are inverted ({} >= {})",
                self.name, self.min_orbit_distance, self.max_orbit_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_are_valid() {
        DatasetProfile::small().validate().unwrap();
        DatasetProfile::large().validate().unwrap();
    }

    #[test]
    fn test_large_profile_is_wider_than_small() {
        let small = DatasetProfile::small();
        let large = DatasetProfile::large();
        assert!(large.scale_factor > small.scale_factor);
        assert!(large.max_orbit_distance > small.max_orbit_distance);
        assert!(large.camera_far_plane > small.camera_far_plane);
    }

    #[test]
    fn test_validate_rejects_bad_profiles() {
        let mut profile = DatasetProfile::small();
        profile.scale_factor = 0.0;
        assert!(matches!(profile.validate(), Err(Error::Config(_))));

        let mut profile = DatasetProfile::small();
        profile.max_orbit_distance = profile.min_orbit_distance;
        assert!(profile.validate().is_err());

        let mut profile = DatasetProfile::large();
        profile.camera_far_plane = f32::NAN;
        assert!(profile.validate().is_err());
    }
}
