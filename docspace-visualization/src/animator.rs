//! Per-frame orientation maintenance
//!
//! Runs once per rendered frame: advances the group rotation when enabled,
//! then makes one pass over the live instances to turn every label towards
//! the camera and cull labels beyond detail distance.

use crate::scene::{SceneState, SharedScene};
use docspace_core::{Error, Result, UnitQuaternion, Vector3f};
use nalgebra::Unit;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Frame animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Turn labels towards the camera every frame
    pub billboarding: bool,
    /// Group rotation per frame, in radians
    pub rotation_step: f32,
    /// Axis the group rotates around
    pub rotation_axis: Vector3f,
    /// Labels farther than this from the camera are hidden
    pub label_detail_distance: f32,
}

impl AnimatorConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.rotation_step.is_finite() {
            return Err(Error::Config("rotation_step must be finite".to_string()));
        }
        if !(self.rotation_axis.norm() > 0.0) {
            return Err(Error::Config("rotation_axis must be non-zero".to_string()));
        }
        if !(self.label_detail_distance > 0.0) {
            return Err(Error::Config("label_detail_distance must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            billboarding: true,
            rotation_step: 0.002,
            rotation_axis: Vector3f::y(),
            label_detail_distance: 20000.0,
        }
    }
}

/// Keeps labels facing the viewer and spins the point group on demand
#[derive(Debug)]
pub struct FrameAnimator {
    scene: SharedScene,
    config: AnimatorConfig,
    rotating: bool,
}

impl FrameAnimator {
    pub fn new(scene: SharedScene, config: AnimatorConfig) -> Self {
        Self {
            scene,
            config,
            rotating: false,
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn start_rotation(&mut self) {
        self.rotating = true;
    }

    pub fn stop_rotation(&mut self) {
        self.rotating = false;
    }

    /// Flip rotation on or off, returning the new state
    pub fn toggle_rotation(&mut self) -> bool {
        self.rotating = !self.rotating;
        self.rotating
    }

    pub fn set_billboarding(&mut self, enabled: bool) {
        self.config.billboarding = enabled;
    }

    /// Advance one frame
    pub fn tick(&self) {
        let mut scene = self.scene.borrow_mut();
        self.animate(&mut scene);
    }

    fn animate(&self, scene: &mut SceneState) {
        if self.rotating {
            if let Some(axis) = Unit::try_new(self.config.rotation_axis, f32::EPSILON) {
                let step = UnitQuaternion::from_axis_angle(&axis, self.config.rotation_step);
                scene.set_group_rotation(step * scene.group_rotation());
            }
        }

        let group = scene.group_rotation();
        let to_local = group.inverse();
        let eye = scene.camera().position;
        let up = scene.camera().up;
        let detail_distance = self.config.label_detail_distance;
        let billboarding = self.config.billboarding;

        for instance in scene.instances_mut() {
            let world = group * instance.position;
            let towards_eye = eye - world;
            let distance = towards_eye.norm();
            instance.visible = distance <= detail_distance;

            if billboarding && distance > f32::EPSILON {
                instance.orientation = to_local * facing(&towards_eye, &up);
            }
        }
    }
}

/// Rotation whose +Z axis points along `direction`, keeping `up` upright
fn facing(direction: &Vector3f, up: &Vector3f) -> UnitQuaternion<f32> {
    let up = if direction.cross(up).norm_squared() > f32::EPSILON {
        *up
    } else {
        Vector3f::z()
    };
    UnitQuaternion::face_towards(direction, &up)
}

/// Timing of the frame being rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub frame: u64,
    pub delta: Duration,
}

type FrameCallback = Box<dyn FnMut(&FrameContext, &mut SceneState)>;

/// Named callbacks invoked once per frame.
///
/// Registering a name again replaces the earlier callback.
#[derive(Default)]
pub struct FrameCallbacks {
    entries: Vec<(String, FrameCallback)>,
}

impl FrameCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: FnMut(&FrameContext, &mut SceneState) + 'static,
    {
        let name = name.into();
        let callback: FrameCallback = Box::new(callback);
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = callback,
            None => self.entries.push((name, callback)),
        }
    }

    /// Remove a callback, returning whether it was registered
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| existing != name);
        self.entries.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every callback in registration order
    pub fn run(&mut self, context: &FrameContext, scene: &mut SceneState) {
        for (_, callback) in &mut self.entries {
            callback(context, scene);
        }
    }
}

impl std::fmt::Debug for FrameCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}
