//! Commands exposed to the surrounding UI
//!
//! Loads are spawned with `tokio::task::spawn_local`, so the controller must
//! be driven from inside a `tokio::task::LocalSet`.

use crate::animator::{FrameAnimator, FrameCallbacks, FrameContext};
use crate::config::SceneConfig;
use crate::scene::{SceneState, SceneStats, SharedScene};
use crate::streamer::{DatasetStreamer, LoadOutcome};
use docspace_core::{DatasetProfile, Result};
use docspace_io::DatasetSource;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns the scene and wires the streamer, animator and frame callbacks to it
pub struct SceneController<S> {
    scene: SharedScene,
    source: Rc<S>,
    streamer: Rc<DatasetStreamer>,
    animator: FrameAnimator,
    callbacks: FrameCallbacks,
    config: SceneConfig,
    frame: u64,
}

impl<S: DatasetSource + 'static> SceneController<S> {
    /// Create a controller with an empty scene
    pub fn new(source: S, config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), config.stream.clone());
        let animator = FrameAnimator::new(scene.clone(), config.animator.clone());

        Ok(Self {
            scene,
            source: Rc::new(source),
            streamer: Rc::new(streamer),
            animator,
            callbacks: FrameCallbacks::new(),
            config,
            frame: 0,
        })
    }

    /// Shared handle to the scene the renderer draws from
    pub fn scene(&self) -> SharedScene {
        self.scene.clone()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Load the small tier, as the application does on start
    pub fn boot(&self) -> Result<JoinHandle<Result<LoadOutcome>>> {
        self.load_small_dataset()
    }

    pub fn load_small_dataset(&self) -> Result<JoinHandle<Result<LoadOutcome>>> {
        self.load_dataset(DatasetProfile::SMALL)
    }

    pub fn load_large_dataset(&self) -> Result<JoinHandle<Result<LoadOutcome>>> {
        self.load_dataset(DatasetProfile::LARGE)
    }

    /// Start streaming the named tier in the background
    ///
    /// The returned handle can be dropped; the load keeps running and any
    /// failure is logged and left visible through the scene state.
    ///
    /// # Errors
    /// Returns `Error::UnknownProfile` if no profile is configured for `tier`.
    ///
    /// # Panics
    /// Panics if called outside a `tokio::task::LocalSet`, since the load is
    /// spawned with `tokio::task::spawn_local`. The same holds for [`boot`],
    /// [`load_small_dataset`] and [`load_large_dataset`].
    ///
    /// [`boot`]: SceneController::boot
    /// [`load_small_dataset`]: SceneController::load_small_dataset
    /// [`load_large_dataset`]: SceneController::load_large_dataset
    pub fn load_dataset(&self, tier: &str) -> Result<JoinHandle<Result<LoadOutcome>>> {
        let profile = self.config.profile(tier)?.clone();
        let source = self.source.clone();
        let streamer = self.streamer.clone();

        Ok(tokio::task::spawn_local(async move {
            let result = streamer.load(source.as_ref(), &profile).await;
            if let Err(e) = &result {
                tracing::warn!(profile = %profile.name, error = %e, "load failed");
            }
            result
        }))
    }

    /// Start or stop the group rotation, returning whether it is now on
    pub fn toggle_rotation(&mut self) -> bool {
        let rotating = self.animator.toggle_rotation();
        tracing::debug!(rotating, "rotation toggled");
        rotating
    }

    pub fn is_rotating(&self) -> bool {
        self.animator.is_rotating()
    }

    /// Callbacks run after the built-in animation every frame
    pub fn callbacks_mut(&mut self) -> &mut FrameCallbacks {
        &mut self.callbacks
    }

    /// Advance one rendered frame
    pub fn tick(&mut self, delta: Duration) {
        self.frame += 1;
        self.animator.tick();

        let context = FrameContext {
            frame: self.frame,
            delta,
        };
        let mut scene = self.scene.borrow_mut();
        self.callbacks.run(&context, &mut scene);
    }

    /// Frames rendered so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Summary of what is on screen
    pub fn stats(&self) -> SceneStats {
        self.scene.borrow().stats()
    }
}
