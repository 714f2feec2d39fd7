//! Chunked dataset ingestion
//!
//! A load fetches the complete record list, computes the layout once from all
//! of it, then commits render instances chunk by chunk, sleeping between
//! chunks so the render loop keeps painting and handling input. Each load
//! carries a generation. A newer load takes over when it commits its first
//! chunk; from then on chunks of older generations are dropped and their
//! streams stop.

use crate::scene::{ActiveDataset, SharedScene};
use crate::view::configure_for;
use docspace_core::{DatasetProfile, DocumentRecord, Error, Generation, RenderInstance, Result};
use docspace_io::DatasetSource;
use docspace_layout::{color_of, Layout};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chunking and pacing of dataset ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Records committed per batch
    pub chunk_size: usize,
    /// Pause between batches, in milliseconds
    pub chunk_delay_ms: u64,
}

impl StreamConfig {
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_delay_ms: 16,
        }
    }
}

/// How a load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Every record was committed
    Completed {
        generation: Generation,
        records: usize,
        batches: usize,
    },
    /// A newer load was requested before this one finished
    Superseded {
        generation: Generation,
        batches: usize,
    },
}

impl LoadOutcome {
    pub fn generation(&self) -> Generation {
        match self {
            LoadOutcome::Completed { generation, .. } | LoadOutcome::Superseded { generation, .. } => *generation,
        }
    }

    pub fn batches(&self) -> usize {
        match self {
            LoadOutcome::Completed { batches, .. } | LoadOutcome::Superseded { batches, .. } => *batches,
        }
    }
}

/// Streams datasets into a shared scene
#[derive(Debug, Clone)]
pub struct DatasetStreamer {
    scene: SharedScene,
    config: StreamConfig,
}

impl DatasetStreamer {
    pub fn new(scene: SharedScene, config: StreamConfig) -> Self {
        Self { scene, config }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Load the dataset described by `profile` from `source`
    ///
    /// The previous dataset stays on screen and keeps streaming until this
    /// load commits its first batch. On fetch failure nothing on screen
    /// changes and the error is returned, unless a newer load has already
    /// taken over, in which case the load ends as superseded.
    pub async fn load<S>(&self, source: &S, profile: &DatasetProfile) -> Result<LoadOutcome>
    where
        S: DatasetSource,
    {
        self.config.validate()?;
        profile.validate()?;

        let generation = self.scene.borrow_mut().request_load();
        tracing::info!(%generation, profile = %profile.name, source = %profile.source_id, "loading dataset");

        let fetched = source.fetch(&profile.source_id).await;
        let mut scene = self.scene.borrow_mut();
        if scene.is_superseded(generation) {
            tracing::debug!(%generation, "load superseded before first chunk");
            scene.finish_load(generation, None);
            return Ok(LoadOutcome::Superseded { generation, batches: 0 });
        }
        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(%generation, error = %e, "dataset fetch failed, keeping previous scene");
                scene.finish_load(generation, Some(e.to_string()));
                return Err(e);
            }
        };

        let dataset = ActiveDataset {
            generation,
            profile: profile.clone(),
            layout: Layout::for_records(&records, profile.scale_factor),
            view: configure_for(profile),
        };

        if records.is_empty() {
            scene.swap_in(dataset);
            scene.finish_load(generation, None);
            return Ok(LoadOutcome::Completed { generation, records: 0, batches: 0 });
        }
        drop(scene);

        let mut batches = 0;
        for (index, chunk) in records.chunks(self.config.chunk_size).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.chunk_delay()).await;
            }

            let instances = build_instances(&dataset.layout, chunk);
            let mut scene = self.scene.borrow_mut();
            if !scene.commit_batch(&dataset, instances) {
                tracing::debug!(%generation, batches, "dropping stale chunk");
                scene.finish_load(generation, None);
                return Ok(LoadOutcome::Superseded { generation, batches });
            }
            batches += 1;
            tracing::debug!(%generation, batch = batches, size = chunk.len(), "committed chunk");
        }

        self.scene.borrow_mut().finish_load(generation, None);
        tracing::info!(%generation, records = records.len(), batches, "dataset loaded");
        Ok(LoadOutcome::Completed {
            generation,
            records: records.len(),
            batches,
        })
    }
}

/// Turn records into placed, colored instances
pub fn build_instances(layout: &Layout, records: &[DocumentRecord]) -> Vec<RenderInstance> {
    records
        .iter()
        .map(|record| {
            let position = layout.place(record);
            RenderInstance::new(record.id, record.label.clone(), position, color_of(&position))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneState;
    use docspace_core::{Centroid, Point3f, NEUTRAL_COLOR};
    use docspace_io::MemoryDatasetSource;
    use std::collections::{HashMap, HashSet};

    /// Serves in-memory datasets after a per-dataset fetch delay
    struct SlowSource {
        inner: MemoryDatasetSource,
        delays: HashMap<String, Duration>,
    }

    impl SlowSource {
        fn new(inner: MemoryDatasetSource) -> Self {
            Self { inner, delays: HashMap::new() }
        }

        fn with_delay(mut self, source_id: &str, millis: u64) -> Self {
            self.delays.insert(source_id.to_string(), Duration::from_millis(millis));
            self
        }
    }

    impl DatasetSource for SlowSource {
        async fn fetch(&self, source_id: &str) -> Result<Vec<DocumentRecord>> {
            if let Some(delay) = self.delays.get(source_id) {
                tokio::time::sleep(*delay).await;
            }
            self.inner.fetch(source_id).await
        }
    }

    fn records(ids: std::ops::Range<u64>) -> Vec<DocumentRecord> {
        ids.map(|id| DocumentRecord::new(id, format!("doc-{}", id), id as f32, (id % 7) as f32, -(id as f32)))
            .collect()
    }

    fn profile(source_id: &str) -> DatasetProfile {
        DatasetProfile {
            source_id: source_id.to_string(),
            ..DatasetProfile::small()
        }
    }

    #[test]
    fn test_build_instances_places_and_colors() {
        let layout = Layout::new(Centroid::origin(), 2.0);
        let records = vec![
            DocumentRecord::new(1, "A", 0.0, 0.0, 0.0),
            DocumentRecord::new(2, "B", 0.0, 3.0, 0.0),
        ];
        let instances = build_instances(&layout, &records);

        assert_eq!(instances[0].position, Point3f::origin());
        assert_eq!(instances[0].color, NEUTRAL_COLOR);
        assert_eq!(instances[1].position, Point3f::new(0.0, 6.0, 0.0));
        assert_eq!(instances[1].color.rgb.to_bytes(), [0, 255, 0]);
        assert_eq!(instances[1].label, "B");
    }

    #[tokio::test(start_paused = true)]
    async fn test_batches_and_ids() {
        for (n, k) in [(1usize, 500usize), (1000, 500), (1001, 500), (37, 10), (9, 3)] {
            let scene = SceneState::shared();
            let streamer = DatasetStreamer::new(scene.clone(), StreamConfig { chunk_size: k, chunk_delay_ms: 5 });
            let source = MemoryDatasetSource::new().with_dataset("d", records(0..n as u64));

            let outcome = streamer.load(&source, &profile("d")).await.unwrap();
            let expected_batches = (n + k - 1) / k;
            assert_eq!(outcome.batches(), expected_batches);
            assert!(matches!(outcome, LoadOutcome::Completed { records, .. } if records == n));

            let scene = scene.borrow();
            assert_eq!(scene.batches_committed(), expected_batches);
            let ids: Vec<u64> = scene.instances().iter().map(|i| i.id).collect();
            assert_eq!(ids.len(), n);
            let unique: HashSet<u64> = ids.iter().copied().collect();
            assert_eq!(unique, (0..n as u64).collect::<HashSet<_>>());
            assert!(!scene.is_loading());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_chunks_commit_in_input_order() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig { chunk_size: 4, chunk_delay_ms: 10 });
        let source = MemoryDatasetSource::new().with_dataset("d", records(0..18));

        streamer.load(&source, &profile("d")).await.unwrap();
        let ids: Vec<u64> = scene.borrow().instances().iter().map(|i| i.id).collect();
        assert_eq!(ids, (0..18).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_centroid_uses_whole_dataset() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig { chunk_size: 1, chunk_delay_ms: 1 });
        let data = vec![
            DocumentRecord::new(1, "a", 10.0, 0.0, 0.0),
            DocumentRecord::new(2, "b", -10.0, 0.0, 0.0),
        ];
        let source = MemoryDatasetSource::new().with_dataset("d", data);
        let mut p = profile("d");
        p.scale_factor = 3.0;

        streamer.load(&source, &p).await.unwrap();
        let scene = scene.borrow();
        let instances = scene.instances();
        assert_eq!(instances[0].position, Point3f::new(30.0, 0.0, 0.0));
        assert_eq!(instances[1].position, Point3f::new(-30.0, 0.0, 0.0));
        assert_eq!(instances[0].color, instances[1].color);
        assert_eq!(scene.active().unwrap().layout.centroid, Centroid::origin());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scene_yields_between_chunks() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig { chunk_size: 10, chunk_delay_ms: 20 });
        let source = MemoryDatasetSource::new().with_dataset("d", records(0..30));

        let observer = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let partial = scene.borrow().instances().len();
            let loading = scene.borrow().is_loading();
            (partial, loading)
        };
        let load_profile = profile("d");
        let (outcome, (partial, loading)) = tokio::join!(streamer.load(&source, &load_profile), observer);

        assert_eq!(outcome.unwrap().batches(), 3);
        assert_eq!(partial, 10);
        assert!(loading);
        assert_eq!(scene.borrow().instances().len(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_dataset_swaps_in() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig::default());
        let source = MemoryDatasetSource::new()
            .with_dataset("full", records(0..3))
            .with_dataset("empty", Vec::new());

        streamer.load(&source, &profile("full")).await.unwrap();
        let outcome = streamer.load(&source, &DatasetProfile { source_id: "empty".to_string(), ..DatasetProfile::large() }).await.unwrap();

        assert_eq!(outcome.batches(), 0);
        let scene = scene.borrow();
        assert!(scene.instances().is_empty());
        assert_eq!(scene.active().unwrap().profile.name, "large");
        assert_eq!(scene.camera().far, 1000000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_is_rejected_before_loading() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig { chunk_size: 0, chunk_delay_ms: 0 });
        let source = MemoryDatasetSource::new().with_dataset("d", records(0..3));

        let err = streamer.load(&source, &profile("d")).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!scene.borrow().is_loading());
        assert_eq!(scene.borrow().latest_requested(), Generation::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_lets_running_stream_finish() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig { chunk_size: 10, chunk_delay_ms: 16 });
        let source = MemoryDatasetSource::new().with_dataset("d", records(0..100));

        let failing = async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            streamer.load(&source, &profile("missing")).await
        };
        let load_profile = profile("d");
        let (first, second) = tokio::join!(streamer.load(&source, &load_profile), failing);

        assert!(matches!(first.unwrap(), LoadOutcome::Completed { records: 100, batches: 10, .. }));
        assert!(matches!(second, Err(Error::Fetch { .. })));

        let scene = scene.borrow();
        let ids: Vec<u64> = scene.instances().iter().map(|i| i.id).collect();
        assert_eq!(ids, (0..100).collect::<Vec<_>>());
        assert!(!scene.is_loading());
        assert!(scene.last_error().unwrap().contains("missing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_superseded_while_fetching() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig { chunk_size: 10, chunk_delay_ms: 16 });
        let source = SlowSource::new(
            MemoryDatasetSource::new()
                .with_dataset("slow", records(0..50))
                .with_dataset("fast", records(100..105)),
        )
        .with_delay("slow", 100);

        let newer = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            streamer.load(&source, &profile("fast")).await
        };
        let load_profile = profile("slow");
        let (older, newer) = tokio::join!(streamer.load(&source, &load_profile), newer);

        let older = older.unwrap();
        let newer = newer.unwrap();
        assert!(matches!(older, LoadOutcome::Superseded { batches: 0, .. }));
        assert!(matches!(newer, LoadOutcome::Completed { records: 5, batches: 1, .. }));

        let scene = scene.borrow();
        let ids: Vec<u64> = scene.instances().iter().map(|i| i.id).collect();
        assert_eq!(ids, (100..105).collect::<Vec<_>>());
        assert_eq!(scene.active_generation(), Some(newer.generation()));
        assert!(!scene.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_fetch_failure_is_silent() {
        let scene = SceneState::shared();
        let streamer = DatasetStreamer::new(scene.clone(), StreamConfig::default());
        let source = SlowSource::new(MemoryDatasetSource::new().with_dataset("fast", records(0..5)))
            .with_delay("broken", 100);

        let newer = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            streamer.load(&source, &profile("fast")).await
        };
        let load_profile = profile("broken");
        let (older, newer) = tokio::join!(streamer.load(&source, &load_profile), newer);

        assert!(matches!(older.unwrap(), LoadOutcome::Superseded { batches: 0, .. }));
        assert!(matches!(newer.unwrap(), LoadOutcome::Completed { records: 5, .. }));
        let scene = scene.borrow();
        assert!(scene.last_error().is_none());
        assert_eq!(scene.instances().len(), 5);
        assert!(!scene.is_loading());
    }
}
