//! Headless scene example for docspace
//!
//! This example drives the full pipeline without a window:
//! - Optionally generating synthetic datasets
//! - Streaming a dataset tier into the scene in chunks
//! - Switching tiers mid-stream
//! - Ticking frames with billboarding and rotation

use anyhow::Context;
use clap::Parser;
use docspace_core::DocumentRecord;
use docspace_io::{read_dataset, write_dataset, FileDatasetSource};
use docspace_layout::{compute_centroid, fit_scale_factor};
use docspace_visualization::{SceneConfig, SceneController};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::{JoinHandle, LocalSet};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(about = "Stream a document embedding dataset into a headless scene")]
struct Args {
    /// Directory that dataset source ids are resolved against
    #[arg(long, default_value = ".")]
    data_root: PathBuf,

    /// Optional JSON scene configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tier to load first
    #[arg(long, default_value = "small")]
    tier: String,

    /// Tier to switch to while the first load is streaming
    #[arg(long)]
    switch_to: Option<String>,

    /// Frame at which to switch tiers
    #[arg(long, default_value_t = 3)]
    switch_frame: u64,

    /// Enable group rotation
    #[arg(long)]
    rotate: bool,

    /// Frames to render after loading finishes
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Write synthetic datasets of this size (and ten times this size) before loading
    #[arg(long)]
    generate: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SceneConfig::from_file(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    if let Some(count) = args.generate {
        for (tier, size) in [("small", count), ("large", count * 10)] {
            let profile = config.profile(tier)?;
            let path = args.data_root.join(&profile.source_id);
            generate_dataset(&path, size)?;
            println!("Wrote {} documents to {}", size, path.display());
        }
    }

    report_suggested_scale(&args.data_root, &config);

    let source = FileDatasetSource::new(&args.data_root);
    let mut controller = SceneController::new(source, config)?;
    if args.rotate {
        controller.toggle_rotation();
    }

    let local = LocalSet::new();
    local
        .run_until(async {
            let first = controller.load_dataset(&args.tier)?;
            let mut second: Option<JoinHandle<_>> = None;

            while !first.is_finished() || second.as_ref().is_some_and(|handle| !handle.is_finished()) {
                controller.tick(FRAME);
                if controller.frame() == args.switch_frame {
                    if let Some(tier) = &args.switch_to {
                        second = Some(controller.load_dataset(tier)?);
                    }
                }
                tokio::time::sleep(FRAME).await;
            }

            match first.await? {
                Ok(outcome) => println!("First load: {:?}", outcome),
                Err(e) => println!("First load failed: {}", e),
            }
            if let Some(handle) = second {
                match handle.await? {
                    Ok(outcome) => println!("Second load: {:?}", outcome),
                    Err(e) => println!("Second load failed: {}", e),
                }
            }
            anyhow::Ok(())
        })
        .await?;

    for _ in 0..args.frames {
        controller.tick(FRAME);
    }

    let stats = controller.stats();
    let scene = controller.scene();
    let scene = scene.borrow();
    println!("\nScene after {} frames:", controller.frame());
    println!("- Profile: {}", stats.profile.as_deref().unwrap_or("none"));
    println!("- Instances: {} ({} labels within detail distance)", stats.instances, stats.visible);
    println!("- Batches committed: {}", stats.batches);
    println!("- Camera far plane: {}", scene.camera().far);
    println!("- Orbit distance: {:?}", scene.orbit());
    println!("- Group rotation: {:.3} rad", scene.group_rotation().angle());
    if let Some(error) = scene.last_error() {
        println!("- Last error: {}", error);
    }
    for instance in scene.instances().iter().take(5) {
        println!(
            "  {:>6} {:<24} at ({:>9.1}, {:>9.1}, {:>9.1}) {}",
            instance.id,
            instance.label,
            instance.position.x,
            instance.position.y,
            instance.position.z,
            instance.color.hsl,
        );
    }

    Ok(())
}

/// Write a deterministic spiral of documents
fn generate_dataset(path: &Path, count: u64) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let records: Vec<DocumentRecord> = (0..count)
        .map(|id| {
            let t = id as f32 / count.max(1) as f32;
            let angle = t * std::f32::consts::TAU * 6.0;
            DocumentRecord::new(id, format!("Document {}", id), angle.cos() * t, angle.sin() * t, t - 0.5)
        })
        .collect();
    write_dataset(&records, path)?;
    Ok(())
}

/// Print the scale factor that would fit each tier into the default extent
fn report_suggested_scale(root: &Path, config: &SceneConfig) {
    for profile in &config.profiles {
        match read_dataset(root.join(&profile.source_id)) {
            Ok(records) => {
                let centroid = compute_centroid(&records);
                let suggested = fit_scale_factor(&records, &centroid, 30000.0);
                println!(
                    "Tier {}: {} documents, configured scale {}, suggested scale {:.0}",
                    profile.name,
                    records.len(),
                    profile.scale_factor,
                    suggested
                );
            }
            Err(e) => tracing::debug!(tier = %profile.name, error = %e, "skipping scale report"),
        }
    }
}
