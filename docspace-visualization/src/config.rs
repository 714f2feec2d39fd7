//! Scene configuration
//!
//! Defaults reproduce the built-in tiers; a JSON file can override any part:
//!
//! ```json
//! {
//!   "stream": { "chunk_size": 250, "chunk_delay_ms": 8 },
//!   "animator": { "rotation_step": 0.004 },
//!   "profiles": [
//!     { "name": "small", "source_id": "data/1k.json", "scale_factor": 5000.0,
//!       "min_orbit_distance": 0.0, "max_orbit_distance": 30000.0, "camera_far_plane": 300000.0 }
//!   ]
//! }
//! ```

use crate::animator::AnimatorConfig;
use crate::streamer::StreamConfig;
use docspace_core::{DatasetProfile, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Everything the scene controller needs besides a dataset source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub stream: StreamConfig,
    pub animator: AnimatorConfig,
    pub profiles: Vec<DatasetProfile>,
}

impl SceneConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("failed to parse scene config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.stream.validate()?;
        self.animator.validate()?;

        let mut names = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !names.insert(profile.name.as_str()) {
                return Err(Error::Config(format!("duplicate profile '{}'", profile.name)));
            }
        }
        Ok(())
    }

    /// Look up a profile by tier name
    pub fn profile(&self, name: &str) -> Result<&DatasetProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            stream: StreamConfig::default(),
            animator: AnimatorConfig::default(),
            profiles: vec![DatasetProfile::small(), DatasetProfile::large()],
        }
    }
}
