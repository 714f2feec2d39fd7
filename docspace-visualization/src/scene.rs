//! Live scene state shared by the streamer, animator and renderer
//!
//! Everything runs on one thread: the streamer commits chunks between its
//! sleeps and the animator updates orientations once per frame. Borrows of
//! the shared state are never held across an `.await`.

use crate::camera::{Camera, OrbitBounds};
use crate::view::ViewConfiguration;
use docspace_core::{DatasetProfile, Generation, RenderInstance, UnitQuaternion};
use docspace_layout::Layout;
use std::cell::RefCell;
use std::rc::Rc;

/// Handle to the scene state given to every collaborator
pub type SharedScene = Rc<RefCell<SceneState>>;

/// The dataset whose instances are currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDataset {
    pub generation: Generation,
    pub profile: DatasetProfile,
    pub layout: Layout,
    pub view: ViewConfiguration,
}

/// Summary of the scene for status displays and logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneStats {
    pub profile: Option<String>,
    pub instances: usize,
    pub visible: usize,
    pub batches: usize,
    pub loading: bool,
}

/// Render state read by the renderer every frame
#[derive(Debug)]
pub struct SceneState {
    latest_requested: Generation,
    pending_loads: usize,
    active: Option<ActiveDataset>,
    instances: Vec<RenderInstance>,
    group_rotation: UnitQuaternion<f32>,
    camera: Camera,
    orbit: OrbitBounds,
    batches_committed: usize,
    last_error: Option<(Generation, String)>,
}

impl SceneState {
    /// Create an empty scene with the initial view settings
    pub fn new() -> Self {
        let mut camera = Camera::default();
        let mut orbit = OrbitBounds::new(0.0, 0.0);
        ViewConfiguration::initial().apply(&mut camera, &mut orbit);

        Self {
            latest_requested: Generation::default(),
            pending_loads: 0,
            active: None,
            instances: Vec::new(),
            group_rotation: UnitQuaternion::identity(),
            camera,
            orbit,
            batches_committed: 0,
            last_error: None,
        }
    }

    /// Create an empty scene behind a shared handle
    pub fn shared() -> SharedScene {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Register a new load request and return its generation.
    ///
    /// Requesting does not touch what is on screen: the dataset being
    /// streamed keeps committing until the new load commits its first batch.
    pub fn request_load(&mut self) -> Generation {
        self.latest_requested = self.latest_requested.next();
        self.pending_loads += 1;
        self.latest_requested
    }

    /// Whether `generation` owns the instances on screen
    pub fn is_current(&self, generation: Generation) -> bool {
        self.active_generation() == Some(generation)
    }

    /// Whether a newer load has already taken over the scene
    pub fn is_superseded(&self, generation: Generation) -> bool {
        self.active_generation().is_some_and(|active| active > generation)
    }

    /// Commit a batch of instances for a load.
    ///
    /// The first batch of a generation replaces the previous dataset's
    /// instances, layout and view settings in one step. Batches from a
    /// superseded generation are dropped and `false` is returned.
    pub fn commit_batch(&mut self, dataset: &ActiveDataset, instances: Vec<RenderInstance>) -> bool {
        if !self.is_current(dataset.generation) && !self.swap_in(dataset.clone()) {
            return false;
        }
        self.instances.extend(instances);
        self.batches_committed += 1;
        true
    }

    /// Make `dataset` the active one, clearing the previous instances
    pub fn swap_in(&mut self, dataset: ActiveDataset) -> bool {
        if self.is_superseded(dataset.generation) {
            return false;
        }
        tracing::info!(
            generation = %dataset.generation,
            profile = %dataset.profile.name,
            replaced = self.instances.len(),
            "swapping in dataset"
        );
        self.instances.clear();
        self.batches_committed = 0;
        dataset.view.apply(&mut self.camera, &mut self.orbit);
        self.active = Some(dataset);
        true
    }

    /// Mark a requested load as finished.
    ///
    /// A failure is kept until a load at least as new completes on screen.
    pub fn finish_load(&mut self, generation: Generation, error: Option<String>) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        match error {
            Some(message) => self.last_error = Some((generation, message)),
            None if self.is_current(generation) => {
                if self.last_error.as_ref().is_some_and(|(failed, _)| *failed <= generation) {
                    self.last_error = None;
                }
            }
            None => {}
        }
    }

    pub fn active(&self) -> Option<&ActiveDataset> {
        self.active.as_ref()
    }

    pub fn active_generation(&self) -> Option<Generation> {
        self.active.as_ref().map(|dataset| dataset.generation)
    }

    pub fn latest_requested(&self) -> Generation {
        self.latest_requested
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut [RenderInstance] {
        &mut self.instances
    }

    pub fn group_rotation(&self) -> UnitQuaternion<f32> {
        self.group_rotation
    }

    pub fn set_group_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.group_rotation = rotation;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access for pointer controls
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn orbit(&self) -> OrbitBounds {
        self.orbit
    }

    /// Whether any requested load has not finished yet
    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    /// Batches committed for the active generation
    pub fn batches_committed(&self) -> usize {
        self.batches_committed
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            profile: self.active.as_ref().map(|dataset| dataset.profile.name.clone()),
            instances: self.instances.len(),
            visible: self.instances.iter().filter(|instance| instance.visible).count(),
            batches: self.batches_committed,
            loading: self.is_loading(),
        }
    }

    /// Message of the most recent failed load
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_ref().map(|(_, message)| message.as_str())
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::configure_for;
    use docspace_core::{Centroid, Point3f, NEUTRAL_COLOR};

    fn dataset(generation: Generation, profile: DatasetProfile) -> ActiveDataset {
        ActiveDataset {
            generation,
            layout: Layout::new(Centroid::origin(), profile.scale_factor),
            view: configure_for(&profile),
            profile,
        }
    }

    fn instances(ids: std::ops::Range<u64>) -> Vec<RenderInstance> {
        ids.map(|id| RenderInstance::new(id, format!("doc-{}", id), Point3f::new(id as f32, 0.0, 0.0), NEUTRAL_COLOR))
            .collect()
    }

    #[test]
    fn test_new_scene_uses_initial_view() {
        let scene = SceneState::new();
        assert_eq!(scene.camera().far, 10000.0);
        assert_eq!(scene.orbit(), ViewConfiguration::initial().orbit);
        assert!(scene.instances().is_empty());
        assert!(!scene.is_loading());
    }

    #[test]
    fn test_first_batch_swaps_dataset_and_view() {
        let mut scene = SceneState::new();
        let first = scene.request_load();
        let small = dataset(first, DatasetProfile::small());
        assert!(scene.commit_batch(&small, instances(0..3)));
        assert!(scene.commit_batch(&small, instances(3..5)));
        assert_eq!(scene.instances().len(), 5);
        assert_eq!(scene.batches_committed(), 2);

        let second = scene.request_load();
        let large = dataset(second, DatasetProfile::large());

        // Previous dataset stays until the new one commits
        assert_eq!(scene.instances().len(), 5);
        assert_eq!(scene.camera().far, 300000.0);

        assert!(scene.commit_batch(&large, instances(100..102)));
        assert_eq!(scene.instances().len(), 2);
        assert_eq!(scene.batches_committed(), 1);
        assert_eq!(scene.camera().far, 1000000.0);
        assert_eq!(scene.orbit().max_distance, 120000.0);
        assert_eq!(scene.active().unwrap().profile.name, "large");
    }

    #[test]
    fn test_stale_batches_are_dropped() {
        let mut scene = SceneState::new();
        let first = scene.request_load();
        let second = scene.request_load();

        assert!(scene.commit_batch(&dataset(second, DatasetProfile::small()), instances(0..1)));
        assert_eq!(scene.active_generation(), Some(second));
        assert!(scene.is_superseded(first));

        assert!(!scene.commit_batch(&dataset(first, DatasetProfile::large()), instances(5..9)));
        assert_eq!(scene.instances().len(), 1);
        assert_eq!(scene.active().unwrap().profile.name, "small");
    }

    #[test]
    fn test_pending_request_does_not_interrupt_active_stream() {
        let mut scene = SceneState::new();
        let first = scene.request_load();
        let small = dataset(first, DatasetProfile::small());
        assert!(scene.commit_batch(&small, instances(0..3)));

        let second = scene.request_load();
        assert!(!scene.is_superseded(first));
        assert!(scene.commit_batch(&small, instances(3..6)));
        assert_eq!(scene.instances().len(), 6);

        scene.finish_load(second, Some("fetch failed".to_string()));
        assert!(scene.commit_batch(&small, instances(6..8)));
        scene.finish_load(first, None);

        assert_eq!(scene.instances().len(), 8);
        assert!(!scene.is_loading());
        assert_eq!(scene.last_error(), Some("fetch failed"));
    }

    #[test]
    fn test_loading_until_every_request_finishes() {
        let mut scene = SceneState::new();
        let first = scene.request_load();
        let second = scene.request_load();

        scene.finish_load(first, None);
        assert!(scene.is_loading());

        scene.finish_load(second, None);
        assert!(!scene.is_loading());
    }

    #[test]
    fn test_newer_success_clears_error() {
        let mut scene = SceneState::new();
        let failed = scene.request_load();
        scene.finish_load(failed, Some("boom".to_string()));
        assert_eq!(scene.last_error(), Some("boom"));

        let retry = scene.request_load();
        assert!(scene.commit_batch(&dataset(retry, DatasetProfile::small()), instances(0..2)));
        scene.finish_load(retry, None);
        assert!(scene.last_error().is_none());
    }
}
