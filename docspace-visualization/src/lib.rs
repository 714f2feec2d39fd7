//! Scene pipeline for 3D document embeddings
//! 
//! This crate turns datasets into a live, navigable scene:
//! - Chunked dataset streaming with generation-based cancellation
//! - Per-frame label billboarding and optional group rotation
//! - Camera and orbit bounds keyed to the loaded dataset
//! - UI commands and per-frame callbacks through [`SceneController`]

pub mod camera;
pub mod view;
pub mod scene;
pub mod streamer;
pub mod animator;
pub mod config;
pub mod controller;

pub use camera::*;
pub use view::*;
pub use scene::*;
pub use streamer::*;
pub use animator::*;
pub use config::*;
pub use controller::*;
